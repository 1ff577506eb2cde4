use crate::domain::zoom::{Axis, Extremes, Preset, ZoomRange, encode};

/// Zoom state of a single chart, owned by its controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub axis: Axis,
    pub current_range: Option<ZoomRange>,
    pub data_extremes: Option<Extremes>,
    /// `None` means a custom range, e.g. after a manual drag
    pub active_preset: Option<Preset>,
}

impl ViewportState {
    pub fn new(axis: Axis) -> Self {
        Self { axis, current_range: None, data_extremes: None, active_preset: None }
    }

    /// Value written to the query string: preset name if one is active, else the key
    pub fn query_value(&self) -> Option<String> {
        match (self.active_preset, &self.current_range) {
            (Some(preset), _) => Some(preset.to_string()),
            (None, Some(range)) => Some(encode(range).into_string()),
            (None, None) => None,
        }
    }
}
