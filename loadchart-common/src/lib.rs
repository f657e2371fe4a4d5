use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code that counts as a successful request. Everything else is
/// excluded from aggregation.
pub const SUCCESS_STATUS: u16 = 200;

/// File name of the completed-requests line chart.
pub const REQUEST_COUNT_FILE: &str = "request_count.png";

/// File name of the per-level duration violin chart.
pub const DURATION_VIOLIN_FILE: &str = "req_duration_violinplot.png";

/// Error types for chart aggregation and rendering
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Io(err.to_string())
    }
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Outcome of one completed request, as reported by the load driver.
///
/// This is also the NDJSON line format consumed by the replay binary:
/// `{"status_code":200,"duration":1.2,"concurrency":5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestOutcome {
    pub status_code: u16,
    /// Wall-clock duration of the request. Unit is whatever the driver
    /// measured in (seconds or milliseconds); charts label it as-is.
    pub duration: f64,
    /// Number of requests in flight when this one ran.
    pub concurrency: u32,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }
}
