// Serial port line source for the WR-01 interface
use crate::application::line_source::{LineSource, TransportError};
use crate::domain::telemetry::RawLine;
use async_trait::async_trait;
use serialport::SerialPort;
use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

const LINE_TERMINATOR: u8 = b'\n';

pub struct SerialLineSource {
    port_name: String,
    // Moved into the blocking worker for the duration of each read.
    reader: Option<BufReader<Box<dyn SerialPort>>>,
}

impl SerialLineSource {
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, TransportError> {
        let port = serialport::new(port_name, baud_rate).timeout(timeout).open()?;

        Ok(Self {
            port_name: port_name.to_string(),
            reader: Some(BufReader::new(port)),
        })
    }
}

#[async_trait]
impl LineSource for SerialLineSource {
    async fn next_line(&mut self) -> Result<Option<RawLine>, TransportError> {
        let reader = self.reader.take().ok_or(TransportError::Closed)?;

        let (reader, result) = tokio::task::spawn_blocking(move || read_line(reader)).await?;
        self.reader = Some(reader);

        let line = result?;
        if line.is_none() {
            tracing::info!("Serial port {} closed", self.port_name);
        }
        Ok(line)
    }
}

/// One blocking line read. A timeout yields the partial (possibly empty)
/// line; a zero-byte read without timeout means the port is gone.
fn read_line<R: BufRead>(mut reader: R) -> (R, std::io::Result<Option<RawLine>>) {
    let mut buf = Vec::new();
    let result = match reader.read_until(LINE_TERMINATOR, &mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(RawLine::new(buf))),
        Err(e) if e.kind() == ErrorKind::TimedOut => {
            if !buf.is_empty() {
                tracing::debug!("Read timed out with {} bytes of a partial line", buf.len());
            }
            Ok(Some(RawLine::new(buf)))
        }
        Err(e) => Err(e),
    };
    (reader, result)
}
