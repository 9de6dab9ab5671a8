// Weather report domain model
use super::error::ReportError;
use super::telemetry::{
    ExtractedField, TelemetryRecord, GROUP_10MIN, GROUP_2MIN, GROUP_CUSTOM, GROUP_INSTANT, GUST,
    LAST_RAIN, RAIN_1HR, RAIN_24HR, RAIN_TOTAL, WIND_DIR, WIND_SPEED,
};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDetail {
    #[default]
    Basic,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindReading {
    pub speed: ExtractedField,
    pub dir: ExtractedField,
    pub gust: ExtractedField,
}

impl WindReading {
    fn extract(record: &TelemetryRecord, group: &str, fallback: &str) -> Result<Self, ReportError> {
        Ok(Self {
            speed: record.field(&[group, WIND_SPEED], fallback)?,
            dir: record.field(&[group, WIND_DIR], fallback)?,
            gust: record.field(&[group, GUST], fallback)?,
        })
    }
}

/// Everything printed in the basic report.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub instant_speed: ExtractedField,
    pub instant_dir: ExtractedField,
    pub avg_2min_speed: ExtractedField,
    pub rain_1hr: ExtractedField,
    pub last_rain: ExtractedField,
    pub detail: Option<DetailedReport>,
}

/// Extra groups and rainfall totals, only extracted in full mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedReport {
    pub avg_2min: WindReading,
    pub avg_10min: WindReading,
    pub custom: WindReading,
    pub rain_24hr: ExtractedField,
    pub rain_total: ExtractedField,
}

impl WeatherReport {
    pub fn extract(
        record: &TelemetryRecord,
        fallback: &str,
        detail: ReportDetail,
    ) -> Result<Self, ReportError> {
        let detail = match detail {
            ReportDetail::Basic => None,
            ReportDetail::Full => Some(DetailedReport {
                avg_2min: WindReading::extract(record, GROUP_2MIN, fallback)?,
                avg_10min: WindReading::extract(record, GROUP_10MIN, fallback)?,
                custom: WindReading::extract(record, GROUP_CUSTOM, fallback)?,
                rain_24hr: record.field(&[RAIN_24HR], fallback)?,
                rain_total: record.field(&[RAIN_TOTAL], fallback)?,
            }),
        };

        Ok(Self {
            instant_speed: record.field(&[GROUP_INSTANT, WIND_SPEED], fallback)?,
            instant_dir: record.field(&[GROUP_INSTANT, WIND_DIR], fallback)?,
            avg_2min_speed: record.field(&[GROUP_2MIN, WIND_SPEED], fallback)?,
            rain_1hr: record.field(&[RAIN_1HR], fallback)?,
            last_rain: record.field(&[LAST_RAIN], fallback)?,
            detail,
        })
    }

    /// Number of basic fields that fell back to the sentinel.
    pub fn missing_fields(&self) -> usize {
        [
            &self.instant_speed,
            &self.instant_dir,
            &self.avg_2min_speed,
            &self.rain_1hr,
            &self.last_rain,
        ]
        .into_iter()
        .filter(|field| field.is_fallback())
        .count()
    }
}
