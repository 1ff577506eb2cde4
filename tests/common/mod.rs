#![allow(dead_code)]

use std::collections::BTreeMap;

use dashboard_zoom_wasm::application::{ChartWidget, SelectorHandles, ViewportConfig, ViewportController};
use dashboard_zoom_wasm::domain::zoom::{DAY_MS, Extremes, Preset, ZoomRange};
use dashboard_zoom_wasm::infrastructure::MemoryQueryStore;

pub const DAY: f64 = DAY_MS;

/// Records every window pushed to it
#[derive(Debug, Default)]
pub struct FakeWidget {
    pub windows: Vec<(f64, f64)>,
    pub extremes: Option<Extremes>,
}

impl ChartWidget for FakeWidget {
    fn set_window(&mut self, range: &ZoomRange) {
        self.windows.push((range.start(), range.end()));
    }

    fn data_extremes(&self) -> Option<Extremes> {
        self.extremes
    }
}

#[derive(Debug, Default)]
pub struct RecordingHandles {
    pub visible: BTreeMap<Preset, bool>,
    pub active: Option<Preset>,
    pub selector_visible: Option<bool>,
}

impl RecordingHandles {
    pub fn shown(&self) -> Vec<Preset> {
        self.visible.iter().filter(|(_, v)| **v).map(|(p, _)| *p).collect()
    }
}

impl SelectorHandles for RecordingHandles {
    fn set_visible(&mut self, preset: Preset, visible: bool) {
        self.visible.insert(preset, visible);
    }

    fn set_active(&mut self, active: Option<Preset>) {
        self.active = active;
    }

    fn set_selector_visible(&mut self, visible: bool) {
        self.selector_visible = Some(visible);
    }
}

pub type TestController = ViewportController<FakeWidget, MemoryQueryStore, RecordingHandles>;

pub fn controller(config: ViewportConfig, store: MemoryQueryStore) -> TestController {
    ViewportController::new("test-chart", config, FakeWidget::default(), store, RecordingHandles::default()).unwrap()
}

pub fn extremes(min: f64, max: f64) -> Extremes {
    Extremes::new(min, max).unwrap()
}

pub fn window(c: &TestController) -> (f64, f64) {
    let r = c.state().current_range.unwrap();
    (r.start(), r.end())
}

pub fn stored(c: &TestController) -> Option<String> {
    c.query().restore()
}
