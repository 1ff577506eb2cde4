mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use dashboard_zoom_wasm::application::{ChartWidget, SharedViewport, ViewportConfig, ViewportController};
use dashboard_zoom_wasm::domain::events::{Transition, ViewportEvent};
use dashboard_zoom_wasm::domain::zoom::{Extremes, Preset, ZoomRange};
use dashboard_zoom_wasm::infrastructure::MemoryQueryStore;

type Viewport = SharedViewport<RedrawingWidget, MemoryQueryStore, RecordingHandles>;

/// Reports every window change back through the shared viewport, the way a
/// chart's draw callback does while `set_window` is still running
#[derive(Default)]
struct RedrawingWidget {
    viewport: Rc<RefCell<Option<Viewport>>>,
    reported: Rc<RefCell<Vec<Transition>>>,
    snap_to: Option<(f64, f64)>,
}

impl ChartWidget for RedrawingWidget {
    fn set_window(&mut self, range: &ZoomRange) {
        let viewport = self.viewport.borrow().clone();
        if let Some(viewport) = viewport {
            let (start, end) = self.snap_to.unwrap_or((range.start(), range.end()));
            let t = viewport.dispatch(ViewportEvent::Redraw { first_draw: false, start, end });
            self.reported.borrow_mut().push(t);
        }
    }

    fn data_extremes(&self) -> Option<Extremes> {
        None
    }
}

fn viewport(snap_to: Option<(f64, f64)>) -> (Viewport, Rc<RefCell<Vec<Transition>>>) {
    let slot = Rc::new(RefCell::new(None));
    let reported = Rc::new(RefCell::new(Vec::new()));
    let widget = RedrawingWidget { viewport: Rc::clone(&slot), reported: Rc::clone(&reported), snap_to };
    let controller =
        ViewportController::new("reentrant", ViewportConfig::default(), widget, MemoryQueryStore::new(), RecordingHandles::default())
            .unwrap();
    let viewport = SharedViewport::new(controller);
    *slot.borrow_mut() = Some(viewport.clone());
    (viewport, reported)
}

fn window_of(viewport: &Viewport) -> (f64, f64) {
    let range = viewport.read(|c| c.state().current_range).flatten().unwrap();
    (range.start(), range.end())
}

#[test]
fn redraw_during_initialize_is_deferred() {
    let (viewport, reported) = viewport(None);

    let t = viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY))).unwrap();

    assert!(matches!(t, Transition::Applied(_)));
    assert_eq!(reported.borrow().as_slice(), &[Transition::Queued]);
    assert_eq!(viewport.pending_len(), 0);
    assert_eq!(window_of(&viewport), (0.0, 100.0 * DAY));
    assert_eq!(viewport.read(|c| c.state().active_preset).unwrap(), Some(Preset::All));
}

#[test]
fn redraw_during_preset_selection_is_deferred() {
    let (viewport, reported) = viewport(None);
    viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY)));

    let t = viewport.dispatch(ViewportEvent::PresetSelected(Preset::Week));

    assert!(matches!(t, Transition::Applied(_)));
    assert_eq!(reported.borrow().len(), 2);
    assert_eq!(viewport.pending_len(), 0);
    assert_eq!(window_of(&viewport), (93.0 * DAY, 100.0 * DAY));
    assert_eq!(viewport.read(|c| c.state().active_preset).unwrap(), Some(Preset::Week));
}

#[test]
fn deferred_redraw_with_moved_window_is_applied_after() {
    // The chart settles on a slightly different window than requested
    let (viewport, _) = viewport(Some((10.0 * DAY, 20.0 * DAY)));

    viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY)));

    assert_eq!(viewport.pending_len(), 0);
    assert_eq!(window_of(&viewport), (10.0 * DAY, 20.0 * DAY));
    assert_eq!(viewport.read(|c| c.state().active_preset).unwrap(), None);
}

#[test]
fn nested_update_is_refused() {
    let (viewport, _) = viewport(None);
    let inner = viewport.clone();

    let nested = viewport.update(|_| inner.update(|c| c.is_reloading())).unwrap();

    assert_eq!(nested, None);
    assert!(viewport.read(|c| c.is_reloading()).is_some());
}
