use crate::domain::zoom::{Extremes, Preset, ZoomRange};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// Typed messages a chart page feeds into its viewport controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    /// A preset button was clicked
    PresetSelected(Preset),
    /// The chart widget finished a drag/zoom gesture
    GestureRange { start: f64, end: f64 },
    /// The chart widget redrew its visible window
    Redraw { first_draw: bool, start: f64, end: f64 },
    /// Fresh data with new axis extremes has been loaded
    DataReload(Extremes),
}

impl ViewportEvent {
    /// Events whose handling reads the current data extremes
    pub fn depends_on_extremes(&self) -> bool {
        !matches!(self, ViewportEvent::DataReload(_))
    }
}

impl DomainEvent for ViewportEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ViewportEvent::PresetSelected(_) => "PresetSelected",
            ViewportEvent::GestureRange { .. } => "GestureRange",
            ViewportEvent::Redraw { .. } => "Redraw",
            ViewportEvent::DataReload(_) => "DataReload",
        }
    }
}

/// What handling one event did to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// State changed and the window was pushed to the chart widget
    Applied(ZoomRange),
    /// State changed; the widget already shows this window
    Updated(ZoomRange),
    /// Deferred until the in-flight reload lands
    Queued,
    /// Nothing to do
    Ignored,
}

impl Transition {
    pub fn range(&self) -> Option<ZoomRange> {
        match self {
            Transition::Applied(range) | Transition::Updated(range) => Some(*range),
            Transition::Queued | Transition::Ignored => None,
        }
    }
}
