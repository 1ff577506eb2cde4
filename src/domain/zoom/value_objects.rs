use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::errors::{ZoomError, ZoomResult};

/// Milliseconds in one day, the base unit of every preset
pub const DAY_MS: f64 = 86_400_000.0;

/// Value Object - what the x axis counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[display(fmt = "time")]
    #[strum(serialize = "time")]
    Time,
    #[display(fmt = "height")]
    #[strum(serialize = "height")]
    Height,
}

/// Value Object - axis kind plus the factor converting one axis unit to milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub kind: AxisKind,
    pub scale: f64,
}

impl Axis {
    /// Time axis: units are milliseconds since the epoch
    pub fn time() -> Self {
        Self { kind: AxisKind::Time, scale: 1.0 }
    }

    /// Height axis: one unit is one block, roughly `block_time_ms` long
    pub fn height(block_time_ms: f64) -> ZoomResult<Self> {
        Self::new(AxisKind::Height, block_time_ms)
    }

    pub fn new(kind: AxisKind, scale: f64) -> ZoomResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ZoomError::InvalidAxisScale(scale));
        }
        Ok(Self { kind, scale })
    }

    pub fn is_height(&self) -> bool {
        self.kind == AxisKind::Height
    }

    /// Convert a duration in milliseconds into axis units
    pub fn units_from_ms(&self, ms: f64) -> f64 {
        ms / self.scale
    }

    pub fn ms_from_units(&self, units: f64) -> f64 {
        units * self.scale
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::time()
    }
}

/// Value Object - full bounds of the currently loaded series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub min: f64,
    pub max: f64,
}

impl Extremes {
    /// Bounds are swapped when given in reverse order
    pub fn new(min: f64, max: f64) -> ZoomResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ZoomError::InvalidRange { start: min, end: max });
        }
        if min > max {
            return Ok(Self { min: max, max: min });
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Days covered by the data, using the axis scale for height axes
    pub fn span_days(&self, axis: &Axis) -> f64 {
        axis.ms_from_units(self.span()) / DAY_MS
    }
}

/// Value Object - half-open visible window `[start, end)` on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    start: f64,
    end: f64,
    axis: Axis,
}

impl ZoomRange {
    pub fn new(start: f64, end: f64, axis: Axis) -> ZoomResult<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(ZoomError::InvalidRange { start, end });
        }
        Ok(Self { start, end, axis })
    }

    /// The whole loaded series; fails when the data is a single point
    pub fn full(extremes: &Extremes, axis: Axis) -> ZoomResult<Self> {
        Self::new(extremes.min, extremes.max, axis)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Overlap with the extremes, `None` if it has no width
    pub fn intersect(&self, extremes: &Extremes) -> Option<Self> {
        Self::new(extremes.clamp(self.start), extremes.clamp(self.end), self.axis).ok()
    }

    pub fn is_within(&self, extremes: &Extremes) -> bool {
        extremes.contains(self.start) && extremes.contains(self.end)
    }

    /// Sum of absolute bound differences
    pub fn distance(&self, start: f64, end: f64) -> f64 {
        (self.start - start).abs() + (self.end - end).abs()
    }

    /// Whether the range shows all of `extremes`
    pub fn covers(&self, extremes: &Extremes, tolerance: f64) -> bool {
        self.start <= extremes.min + tolerance && self.end >= extremes.max - tolerance
    }

    /// Widen to `min_width` around the centre, kept inside `extremes`
    pub fn with_min_width(&self, min_width: f64, extremes: &Extremes) -> Self {
        if self.width() >= min_width {
            return *self;
        }
        if extremes.span() <= min_width {
            return Self { start: extremes.min, end: extremes.max, axis: self.axis };
        }
        let center = (self.start + self.end) * 0.5;
        let mut start = center - min_width * 0.5;
        let mut end = center + min_width * 0.5;
        if start < extremes.min {
            end += extremes.min - start;
            start = extremes.min;
        }
        if end > extremes.max {
            start -= end - extremes.max;
            end = extremes.max;
        }
        Self { start, end, axis: self.axis }
    }
}
