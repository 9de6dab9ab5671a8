// Reporter service - The read/decode/report loop
use crate::application::line_source::{LineSource, TransportError};
use crate::domain::error::ReportError;
use crate::domain::report::{ReportDetail, WeatherReport};
use crate::domain::telemetry::RawLine;
use crate::infrastructure::config::ReportSettings;
use crate::infrastructure::json_decoder::decode_record;
use crate::presentation::console::{write_error, write_report};
use std::io::Write;

pub struct TelemetryReporter<S, W> {
    source: S,
    out: W,
    fallback: String,
    detail: ReportDetail,
}

impl<S: LineSource, W: Write> TelemetryReporter<S, W> {
    pub fn new(source: S, out: W, settings: &ReportSettings) -> Self {
        Self {
            source,
            out,
            fallback: settings.fallback.clone(),
            detail: settings.detail,
        }
    }

    /// Report every line until the source shuts down.
    ///
    /// Malformed records never end the loop; only a transport failure does.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        while let Some(line) = self.source.next_line().await? {
            self.handle_line(&line);
        }

        tracing::info!("Line source closed, stopping reporter");
        Ok(())
    }

    fn handle_line(&mut self, line: &RawLine) {
        let err = match self.process_line(line) {
            Ok(()) => return,
            Err(err) => err,
        };

        match &err {
            ReportError::Decode(e) => {
                tracing::warn!(line = e.line(), column = e.column(), "Discarding malformed record: {}", e);
            }
            ReportError::Operation(msg) => {
                tracing::warn!("Discarding unusable record: {}", msg);
            }
        }

        if let Err(e) = write_error(&mut self.out, &err) {
            tracing::error!("Failed to write error line: {}", e);
        }
    }

    fn process_line(&mut self, line: &RawLine) -> Result<(), ReportError> {
        let text = line.text()?;
        if text.is_empty() {
            return Ok(());
        }

        let record = decode_record(text)?;
        let report = WeatherReport::extract(&record, &self.fallback, self.detail)?;

        tracing::debug!(
            wind_speed = %report.instant_speed,
            wind_dir = %report.instant_dir,
            rain_1hr = %report.rain_1hr,
            missing = report.missing_fields(),
            "Reporting record"
        );

        write_report(&mut self.out, &report)?;
        Ok(())
    }
}
