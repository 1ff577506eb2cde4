use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use super::key;
use super::value_objects::{Axis, DAY_MS, Extremes, ZoomRange};
use crate::domain::errors::{ZoomError, ZoomResult};
use crate::domain::logging::{LogComponent, get_logger};

/// Relative slack a preset allows before a range counts as custom
const PRESET_TOLERANCE: f64 = 0.01;

/// Value Object - named zoom window measured back from the latest point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[display(fmt = "day")]
    #[strum(serialize = "day")]
    Day,
    #[display(fmt = "week")]
    #[strum(serialize = "week")]
    Week,
    #[display(fmt = "month")]
    #[strum(serialize = "month")]
    Month,
    #[display(fmt = "year")]
    #[strum(serialize = "year")]
    Year,
    #[display(fmt = "all")]
    #[strum(serialize = "all")]
    All,
}

impl Preset {
    /// Window length in milliseconds, `None` for the whole series
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            Preset::Day => Some(DAY_MS),
            Preset::Week => Some(7.0 * DAY_MS),
            Preset::Month => Some(30.0 * DAY_MS),
            Preset::Year => Some(365.0 * DAY_MS),
            Preset::All => None,
        }
    }

    pub fn duration_units(&self, axis: &Axis) -> Option<f64> {
        self.duration_ms().map(|ms| axis.units_from_ms(ms))
    }

    /// Days of data needed before the preset button is worth showing
    pub fn min_span_days(&self) -> f64 {
        match self {
            Preset::Day | Preset::All => 1.0,
            Preset::Week => 7.0,
            Preset::Month => 30.0,
            Preset::Year => 365.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Day => "Day",
            Preset::Week => "Week",
            Preset::Month => "Month",
            Preset::Year => "Year",
            Preset::All => "All",
        }
    }
}

/// Where a validated range came from
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Preset(Preset),
    Key,
    /// The value could not be used; the whole series is shown instead
    Fallback(ZoomError),
}

/// Domain service resolving presets and keys against loaded data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCatalog {
    axis: Axis,
    min_size: f64,
}

impl ZoomCatalog {
    pub fn new(axis: Axis, min_size: f64) -> Self {
        let min_size = if min_size.is_finite() && min_size > 0.0 { min_size } else { 1.0 };
        Self { axis, min_size }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Concrete window of a preset: `max(min, max - duration) .. max`
    pub fn preset_range(&self, preset: Preset, extremes: &Extremes) -> ZoomResult<ZoomRange> {
        let start = match preset.duration_units(&self.axis) {
            Some(duration) => (extremes.max - duration).max(extremes.min),
            None => extremes.min,
        };
        ZoomRange::new(start, extremes.max, self.axis)
    }

    /// Resolve a preset name or an encoded key; never fails for usable extremes.
    pub fn validate(&self, value: &str, extremes: &Extremes) -> ZoomResult<ZoomRange> {
        self.try_validate(value, extremes).map(|(range, _)| range)
    }

    /// Like [`validate`](Self::validate), also reporting which path produced the range
    pub fn try_validate(&self, value: &str, extremes: &Extremes) -> ZoomResult<(ZoomRange, Resolution)> {
        if let Ok(preset) = Preset::from_str(value) {
            return Ok((self.preset_range(preset, extremes)?, Resolution::Preset(preset)));
        }

        let decoded = match key::decode(value, self.axis) {
            Ok(range) => range,
            Err(e) => {
                get_logger().recovered(LogComponent::Domain("ZoomCatalog"), &e, "all");
                return Ok((ZoomRange::full(extremes, self.axis)?, Resolution::Fallback(e)));
            }
        };

        match decoded.intersect(extremes) {
            Some(clipped) => Ok((clipped.with_min_width(self.min_size, extremes), Resolution::Key)),
            None => {
                let e = ZoomError::EmptyIntersection {
                    start: decoded.start(),
                    end: decoded.end(),
                    min: extremes.min,
                    max: extremes.max,
                };
                get_logger().recovered(LogComponent::Domain("ZoomCatalog"), &e, "all");
                Ok((ZoomRange::full(extremes, self.axis)?, Resolution::Fallback(e)))
            }
        }
    }

    /// Allowed distance between a range and a preset window.
    ///
    /// Windows shorter than the data get a relative slack; a window equal to
    /// the whole series only absorbs rounding, so a nearly-full custom window stays custom.
    pub fn tolerance(&self, preset: Preset, extremes: &Extremes) -> f64 {
        match preset.duration_units(&self.axis) {
            Some(duration) if duration < extremes.span() => (duration * PRESET_TOLERANCE).max(1.0),
            _ => self.full_range_tolerance(),
        }
    }

    /// Slack for "shows the whole series": one axis unit or the minimum zoom width
    pub fn full_range_tolerance(&self) -> f64 {
        self.min_size.max(1.0)
    }

    /// Preset whose window is closest to `range`, or `None` for a custom range.
    /// Equal distances go to the later preset, so clipped presets report `all`.
    pub fn nearest_preset(&self, range: &ZoomRange, extremes: &Extremes) -> Option<Preset> {
        let mut best: Option<(Preset, f64)> = None;
        for preset in Preset::iter() {
            let Ok(candidate) = self.preset_range(preset, extremes) else {
                continue;
            };
            let delta = candidate.distance(range.start(), range.end());
            if delta > self.tolerance(preset, extremes) {
                continue;
            }
            if best.is_none_or(|(_, best_delta)| delta <= best_delta) {
                best = Some((preset, delta));
            }
        }
        best.map(|(preset, _)| preset)
    }

    /// Carry a selection over to reloaded data; always inside `new_extremes`
    pub fn project(&self, previous: &ZoomRange, old_extremes: &Extremes, new_extremes: &Extremes) -> ZoomResult<ZoomRange> {
        match self.try_project(previous, old_extremes, new_extremes) {
            Err(e @ ZoomError::EmptyIntersection { .. }) => {
                get_logger().recovered(LogComponent::Domain("ZoomCatalog"), &e, "all");
                ZoomRange::full(new_extremes, self.axis)
            }
            other => other,
        }
    }

    /// Projection that reports an empty overlap instead of recovering from it
    pub fn try_project(&self, previous: &ZoomRange, old_extremes: &Extremes, new_extremes: &Extremes) -> ZoomResult<ZoomRange> {
        if previous.covers(old_extremes, self.full_range_tolerance()) {
            return ZoomRange::full(new_extremes, self.axis);
        }
        let previous = ZoomRange::new(previous.start(), previous.end(), self.axis)?;
        previous
            .intersect(new_extremes)
            .ok_or(ZoomError::EmptyIntersection {
                start: previous.start(),
                end: previous.end(),
                min: new_extremes.min,
                max: new_extremes.max,
            })
    }
}
