// Main entry point - Configuration, transport selection and the report loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::future::Future;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::application::line_source::LineSource;
use crate::application::reporter_service::TelemetryReporter;
use crate::infrastructure::config::{load_sensor_config, ReportSettings, SourceKind};
use crate::infrastructure::replay_source::ReplayLineSource;
use crate::infrastructure::serial_source::SerialLineSource;

// A serial read parked in a blocking worker is not cancelled on Ctrl-C.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with reports on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run_until_shutdown(serve())?
}

/// Drive `future` to completion, then stop the runtime without waiting for
/// blocking workers longer than `SHUTDOWN_GRACE`.
fn run_until_shutdown<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    Ok(output)
}

async fn serve() -> anyhow::Result<()> {
    let config = load_sensor_config()?;

    match config.source {
        SourceKind::Serial => {
            let serial = &config.serial;
            let source = SerialLineSource::open(&serial.port, serial.baud_rate, serial.timeout())
                .with_context(|| format!("Failed to open serial port {}", serial.port))?;
            tracing::info!("Listening on {} at {} baud...", serial.port, serial.baud_rate);
            report(source, &config.report).await
        }
        SourceKind::Replay => {
            let Some(replay) = &config.replay else {
                anyhow::bail!("replay source selected without replay settings");
            };
            let source =
                ReplayLineSource::open(&replay.path, Duration::from_millis(replay.interval_ms)).await?;
            tracing::info!("Replaying {}", replay.path.display());
            report(source, &config.report).await
        }
    }
}

async fn report<S: LineSource>(source: S, settings: &ReportSettings) -> anyhow::Result<()> {
    let mut reporter = TelemetryReporter::new(source, std::io::stdout(), settings);

    tokio::select! {
        result = reporter.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_shutdown_does_not_wait_for_parked_blocking_read() {
        let started = Instant::now();

        let output = run_until_shutdown(async {
            let _worker = tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(5)));
            42
        })
        .unwrap();

        assert_eq!(output, 42);
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
