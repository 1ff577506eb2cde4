use serde::{Deserialize, Serialize};

use crate::domain::errors::ZoomResult;
use crate::domain::zoom::{Axis, AxisKind, Extremes, Preset, ZoomCatalog};

/// Average block time used to relate heights to time presets (5 minutes)
pub const DEFAULT_BLOCK_TIME_MS: f64 = 300_000.0;

/// Per-chart replacement for one or both data bounds.
///
/// Some series carry leading or trailing points that should not be reachable by
/// zooming (e.g. a supply curve with projected future values).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LimitsOverride {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl LimitsOverride {
    pub fn apply(&self, extremes: Extremes) -> Extremes {
        let min = self.start.filter(|v| v.is_finite()).unwrap_or(extremes.min);
        let max = self.end.filter(|v| v.is_finite()).unwrap_or(extremes.max);
        Extremes::new(min, max).unwrap_or(extremes)
    }
}

/// Settings of one chart's viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Query-string parameter holding the zoom
    pub param: String,
    /// Preset name or key used when the URL has none; never written to the URL
    pub default_zoom: String,
    pub axis: AxisKind,
    pub block_time_ms: f64,
    /// Narrowest window a key may resolve to, in axis units
    pub min_size: f64,
    /// Re-anchor an active preset on reload instead of projecting the old window
    pub follow_preset_on_reload: bool,
    pub limits: Option<LimitsOverride>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            param: "zoom".to_string(),
            default_zoom: Preset::All.to_string(),
            axis: AxisKind::Time,
            block_time_ms: DEFAULT_BLOCK_TIME_MS,
            min_size: 1.0,
            follow_preset_on_reload: false,
            limits: None,
        }
    }
}

impl ViewportConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn axis(&self) -> ZoomResult<Axis> {
        match self.axis {
            AxisKind::Time => Ok(Axis::time()),
            AxisKind::Height => Axis::height(self.block_time_ms),
        }
    }

    pub fn catalog(&self) -> ZoomResult<ZoomCatalog> {
        Ok(ZoomCatalog::new(self.axis()?, self.min_size))
    }

    pub fn effective_extremes(&self, extremes: Extremes) -> Extremes {
        match &self.limits {
            Some(limits) => limits.apply(extremes),
            None => extremes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewportConfig::from_json(r#"{"axis":"height","defaultZoom":"month"}"#).unwrap();
        assert_eq!(config.param, "zoom");
        assert_eq!(config.default_zoom, "month");
        assert!(config.axis().unwrap().is_height());
        assert_eq!(config.axis().unwrap().scale, DEFAULT_BLOCK_TIME_MS);
    }

    #[test]
    fn limits_replace_single_bound() {
        let limits = LimitsOverride { start: None, end: Some(500.0) };
        let ex = limits.apply(Extremes::new(0.0, 1000.0).unwrap());
        assert_eq!((ex.min, ex.max), (0.0, 500.0));
    }
}
