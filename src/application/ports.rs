//! Collaborator seams of the viewport controller.
//!
//! Everything the controller touches outside of its own state goes through one
//! of these traits, so tests can drive it with in-memory fakes.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{InfrastructureError, InfrastructureResult};
use crate::domain::zoom::{AxisKind, Extremes, Preset, ZoomRange};

/// The charting widget that renders one series
pub trait ChartWidget {
    /// Show `[start, end)` on the x axis
    fn set_window(&mut self, range: &ZoomRange);

    /// Full x bounds of the data the widget currently holds
    fn data_extremes(&self) -> Option<Extremes>;
}

/// Page query-string access
pub trait QueryStore {
    fn get(&self, param: &str) -> Option<String>;
    fn set(&mut self, param: &str, value: &str) -> InfrastructureResult<()>;
    fn remove(&mut self, param: &str) -> InfrastructureResult<()>;
}

/// Preset buttons of one chart
pub trait SelectorHandles {
    fn set_visible(&mut self, preset: Preset, visible: bool);
    fn set_active(&mut self, active: Option<Preset>);
    /// Whole button group; hidden when the data spans less than a day
    fn set_selector_visible(&mut self, _visible: bool) {}
}

/// Parameters of one series request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub chart: String,
    pub bin: String,
    pub axis: AxisKind,
}

impl SeriesQuery {
    pub fn new(chart: impl Into<String>, bin: impl Into<String>, axis: AxisKind) -> Self {
        Self { chart: chart.into(), bin: bin.into(), axis }
    }
}

/// A loaded series: its x bounds plus the raw payload for the widget
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub extremes: Extremes,
    pub payload: serde_json::Value,
}

/// Backend the chart data comes from
pub trait SeriesSource {
    fn fetch<'a>(&'a self, query: &'a SeriesQuery) -> LocalBoxFuture<'a, Result<SeriesData, InfrastructureError>>;
}
