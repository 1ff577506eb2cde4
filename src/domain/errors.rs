use derive_more::Display;

/// Zoom subsystem errors - all of them are recoverable
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ZoomError {
    /// Malformed or unparseable zoom value from the query string
    #[display(fmt = "Invalid zoom key '{}': {}", key, reason)]
    InvalidZoomKey { key: String, reason: String },
    /// Projected range has no overlap with freshly loaded data
    #[display(fmt = "Range [{}, {}) does not intersect new extremes [{}, {}]", start, end, min, max)]
    EmptyIntersection { start: f64, end: f64, min: f64, max: f64 },
    /// Network reply arrived after a newer one was accepted
    #[display(fmt = "Stale response #{} (accepted #{})", seq, accepted)]
    StaleResponse { seq: u64, accepted: u64 },
    #[display(fmt = "Invalid range [{}, {})", start, end)]
    InvalidRange { start: f64, end: f64 },
    #[display(fmt = "Invalid axis scale {}", _0)]
    InvalidAxisScale(f64),
}

impl std::error::Error for ZoomError {}

impl ZoomError {
    pub fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        ZoomError::InvalidZoomKey { key: key.to_string(), reason: reason.into() }
    }
}

/// Browser adapter errors
#[derive(Debug, Clone, PartialEq, Display)]
pub enum InfrastructureError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Browser API Error: {}", _0)]
    BrowserApi(String),
    #[display(fmt = "Parse Error: {}", _0)]
    Parse(String),
}

impl std::error::Error for InfrastructureError {}

pub type ZoomResult<T> = Result<T, ZoomError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
