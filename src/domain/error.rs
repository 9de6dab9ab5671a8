// Errors raised while turning one raw line into a report
use thiserror::Error;

/// Per-record failures. Both are recovered by the reporter loop.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Operation(String),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Operation(format!("failed to write report: {}", err))
    }
}
