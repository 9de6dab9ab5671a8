// Line source trait for raw sensor output
use crate::domain::telemetry::RawLine;
use async_trait::async_trait;
use thiserror::Error;

/// Failures of the transport itself. These end the reporter loop.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("blocking read worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("transport handle is no longer available")]
    Closed,
}

#[async_trait]
pub trait LineSource: Send {
    /// Read the next line.
    ///
    /// `Ok(None)` signals that the source has shut down. A read that times
    /// out returns whatever arrived before the timeout, possibly nothing.
    async fn next_line(&mut self) -> Result<Option<RawLine>, TransportError>;
}
