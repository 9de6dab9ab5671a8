use crate::domain::report::ReportDetail;
use anyhow::{bail, ensure};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    pub source: SourceKind,
    pub serial: SerialSettings,
    #[serde(default)]
    pub replay: Option<ReplaySettings>,
    pub report: ReportSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Serial,
    Replay,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SerialSettings {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_seconds: f64,
}

impl SerialSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySettings {
    pub path: PathBuf,
    #[serde(default)]
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub fallback: String,
    #[serde(default)]
    pub detail: ReportDetail,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            fallback: "?".to_string(),
            detail: ReportDetail::Basic,
        }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.serial.baud_rate > 0, "serial.baud_rate must be positive");
        // Zero makes serial reads non-blocking and the loop would spin.
        ensure!(
            self.serial.timeout_seconds > 0.0
                && Duration::try_from_secs_f64(self.serial.timeout_seconds).is_ok(),
            "serial.timeout_seconds must be a positive number of seconds, got {}",
            self.serial.timeout_seconds
        );
        if self.source == SourceKind::Replay && self.replay.is_none() {
            bail!("source is 'replay' but no [replay] section with a path is configured");
        }
        Ok(())
    }
}

/// Load `config/sensor` (optional) with `WR01__*` environment overrides.
pub fn load_sensor_config() -> anyhow::Result<SensorConfig> {
    sensor_config_from(config::File::with_name("config/sensor").required(false))
}

fn sensor_config_from<S>(file: S) -> anyhow::Result<SensorConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("source", "serial")?
        .set_default("serial.port", "/dev/ttyUSB0")?
        .set_default("serial.baud_rate", 115200)?
        .set_default("serial.timeout_seconds", 1.0)?
        .set_default("report.fallback", "?")?
        .set_default("report.detail", "basic")?
        .add_source(file)
        .add_source(config::Environment::with_prefix("WR01").separator("__"))
        .build()?;

    let config: SensorConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
