// Replays captured sensor output from a file
use crate::application::line_source::{LineSource, TransportError};
use crate::domain::telemetry::RawLine;
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct ReplayLineSource {
    reader: BufReader<File>,
    interval: Duration,
    started: bool,
}

impl ReplayLineSource {
    pub async fn open(path: &Path, interval: Duration) -> anyhow::Result<Self> {
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;

        Ok(Self {
            reader: BufReader::new(file),
            interval,
            started: false,
        })
    }
}

#[async_trait]
impl LineSource for ReplayLineSource {
    async fn next_line(&mut self) -> Result<Option<RawLine>, TransportError> {
        // Pace between lines, not before the first one.
        if self.started && !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
        self.started = true;

        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            tracing::info!("Replay file exhausted");
            return Ok(None);
        }
        Ok(Some(RawLine::new(buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn capture_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wr01-{}-{}.log", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_replays_lines_in_order_then_stops() {
        let path = capture_file("order", "{\"last_rain\":1}\n\n{\"last_rain\":2}");
        let mut source = ReplayLineSource::open(&path, Duration::ZERO).await.unwrap();

        assert_eq!(source.next_line().await.unwrap(), Some(RawLine::from("{\"last_rain\":1}\n")));
        assert_eq!(source.next_line().await.unwrap(), Some(RawLine::from("\n")));
        assert_eq!(source.next_line().await.unwrap(), Some(RawLine::from("{\"last_rain\":2}")));
        assert_eq!(source.next_line().await.unwrap(), None);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails_to_open() {
        let path = std::env::temp_dir().join("wr01-definitely-missing.log");
        assert!(ReplayLineSource::open(&path, Duration::ZERO).await.is_err());
    }
}
