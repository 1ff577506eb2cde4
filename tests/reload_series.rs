mod common;

use std::cell::{Cell, RefCell};

use common::*;
use dashboard_zoom_wasm::application::{SeriesData, SeriesQuery, SeriesSource, SharedViewport, ViewportConfig, reload_series};
use dashboard_zoom_wasm::domain::errors::InfrastructureError;
use dashboard_zoom_wasm::domain::events::{Transition, ViewportEvent};
use dashboard_zoom_wasm::domain::zoom::{AxisKind, Extremes, Preset};
use dashboard_zoom_wasm::infrastructure::MemoryQueryStore;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde_json::json;

/// Answers every request with fixed extremes
struct FixedSource {
    result: Result<Extremes, String>,
    calls: Cell<usize>,
}

impl FixedSource {
    fn ok(min: f64, max: f64) -> Self {
        Self { result: Ok(extremes(min, max)), calls: Cell::new(0) }
    }

    fn failing(reason: &str) -> Self {
        Self { result: Err(reason.to_string()), calls: Cell::new(0) }
    }
}

impl SeriesSource for FixedSource {
    fn fetch<'a>(&'a self, query: &'a SeriesQuery) -> LocalBoxFuture<'a, Result<SeriesData, InfrastructureError>> {
        self.calls.set(self.calls.get() + 1);
        let result = self
            .result
            .clone()
            .map(|extremes| SeriesData { extremes, payload: json!({ "chart": query.chart }) })
            .map_err(InfrastructureError::Network);
        async move { result }.boxed_local()
    }
}

/// Resolves only once the test releases it
struct GatedSource {
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    extremes: Extremes,
}

impl SeriesSource for GatedSource {
    fn fetch<'a>(&'a self, _query: &'a SeriesQuery) -> LocalBoxFuture<'a, Result<SeriesData, InfrastructureError>> {
        let gate = self.gate.borrow_mut().take();
        async move {
            if let Some(gate) = gate {
                gate.await.map_err(|e| InfrastructureError::Network(e.to_string()))?;
            }
            Ok(SeriesData { extremes: self.extremes, payload: json!({}) })
        }
        .boxed_local()
    }
}

fn query() -> SeriesQuery {
    SeriesQuery::new("ticket-price", "day", AxisKind::Time)
}

#[test]
fn reload_hands_payload_over_then_applies() {
    let viewport = SharedViewport::new(controller(ViewportConfig::default(), MemoryQueryStore::with("zoom", "week")));
    let source = FixedSource::ok(0.0, 100.0 * DAY);
    let mut delivered = None;

    let t = block_on(reload_series(&viewport, &source, &query(), |series| {
        delivered = Some(series.payload.clone());
    }));

    assert_eq!(source.calls.get(), 1);
    assert_eq!(delivered, Some(json!({ "chart": "ticket-price" })));
    assert_eq!(t.range().map(|r| (r.start(), r.end())), Some((93.0 * DAY, 100.0 * DAY)));
    assert_eq!(viewport.read(|c| c.state().active_preset).unwrap(), Some(Preset::Week));
    assert!(!viewport.read(|c| c.is_reloading()).unwrap());
}

#[test]
fn failed_fetch_keeps_previous_data() {
    let viewport = SharedViewport::new(controller(ViewportConfig::default(), MemoryQueryStore::new()));
    viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY)));
    let source = FixedSource::failing("HTTP error: 503 - Service Unavailable");
    let mut delivered = false;

    let t = block_on(reload_series(&viewport, &source, &query(), |_| delivered = true));

    assert_eq!(t, Transition::Ignored);
    assert!(!delivered);
    assert_eq!(viewport.read(|c| c.state().data_extremes).unwrap(), Some(extremes(0.0, 100.0 * DAY)));
    assert!(!viewport.read(|c| c.is_reloading()).unwrap());
}

#[test]
fn superseded_reload_does_not_reach_the_chart() {
    let viewport = SharedViewport::new(controller(ViewportConfig::default(), MemoryQueryStore::new()));
    viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY)));

    let (release, gate) = oneshot::channel();
    let slow_source = GatedSource { gate: RefCell::new(Some(gate)), extremes: extremes(0.0, 150.0 * DAY) };
    let slow_query = query();
    let slow_delivered = Cell::new(false);

    block_on(async {
        let mut slow = Box::pin(reload_series(&viewport, &slow_source, &slow_query, |_| slow_delivered.set(true)));
        assert!(futures::poll!(slow.as_mut()).is_pending());

        viewport.update(|c| {
            let ticket = c.begin_reload();
            c.complete_reload(ticket, extremes(0.0, 300.0 * DAY))
        });
        release.send(()).unwrap();

        assert_eq!(slow.await, Transition::Ignored);
    });

    assert!(!slow_delivered.get());
    assert_eq!(viewport.read(|c| c.state().data_extremes).unwrap(), Some(extremes(0.0, 300.0 * DAY)));
    assert!(!viewport.read(|c| c.is_reloading()).unwrap());
}

#[test]
fn gesture_during_fetch_is_queued() {
    let viewport = SharedViewport::new(controller(ViewportConfig::default(), MemoryQueryStore::new()));
    viewport.update(|c| c.initialize(None, extremes(0.0, 100.0 * DAY)));
    let source = FixedSource::ok(0.0, 200.0 * DAY);

    let t = block_on(reload_series(&viewport, &source, &query(), |_| {
        let queued = viewport.dispatch(ViewportEvent::GestureRange { start: 10.0 * DAY, end: 20.0 * DAY });
        assert_eq!(queued, Transition::Queued);
    }));

    assert!(matches!(t, Transition::Applied(_)));
    let range = viewport.read(|c| c.state().current_range).flatten().unwrap();
    assert_eq!((range.start(), range.end()), (10.0 * DAY, 20.0 * DAY));
}
