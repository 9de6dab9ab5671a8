// Telemetry data domain models
use crate::domain::error::ReportError;
use serde_json::{Map, Value};
use std::fmt;

/// Averaging groups published by the WR-01.
pub const GROUP_INSTANT: &str = "instant";
pub const GROUP_2MIN: &str = "2min";
pub const GROUP_10MIN: &str = "10min";
pub const GROUP_CUSTOM: &str = "custom";

pub const WIND_SPEED: &str = "wind_speed";
pub const WIND_DIR: &str = "wind_dir";
pub const GUST: &str = "gust";

pub const RAIN_1HR: &str = "rain_1hr";
pub const RAIN_24HR: &str = "rain_24hr";
pub const RAIN_TOTAL: &str = "rain_total";
pub const LAST_RAIN: &str = "last_rain";

/// One read from a line source, terminator included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLine {
    bytes: Vec<u8>,
}

impl RawLine {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode as UTF-8 and strip surrounding whitespace.
    pub fn text(&self) -> Result<&str, ReportError> {
        std::str::from_utf8(&self.bytes)
            .map(str::trim)
            .map_err(|e| ReportError::Operation(format!("invalid UTF-8 in line: {}", e)))
    }
}

impl From<&str> for RawLine {
    fn from(line: &str) -> Self {
        Self::new(line.as_bytes().to_vec())
    }
}

/// A decoded sensor reading. The top level is always a mapping; anything
/// below it is whatever the device sent.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    fields: Map<String, Value>,
}

impl TelemetryRecord {
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ReportError::Operation(format!(
                "expected a JSON object at top level, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Walk `path` through nested groups.
    ///
    /// Returns `Ok(None)` as soon as a segment is missing. A segment that is
    /// present but is not a mapping cannot be descended into and is an error.
    pub fn lookup(&self, path: &[&str]) -> Result<Option<&Value>, ReportError> {
        let Some((first, rest)) = path.split_first() else {
            return Err(ReportError::Operation("empty key path".to_string()));
        };

        let mut current = match self.fields.get(*first) {
            Some(value) => value,
            None => return Ok(None),
        };
        let mut walked = vec![*first];

        for segment in rest {
            let group = current.as_object().ok_or_else(|| {
                ReportError::Operation(format!(
                    "'{}' is {}, not a group",
                    walked.join("."),
                    kind_of(current)
                ))
            })?;
            current = match group.get(*segment) {
                Some(value) => value,
                None => return Ok(None),
            };
            walked.push(*segment);
        }

        Ok(Some(current))
    }

    /// Extract a field, substituting `fallback` when any segment is absent.
    pub fn field(&self, path: &[&str], fallback: &str) -> Result<ExtractedField, ReportError> {
        Ok(match self.lookup(path)? {
            Some(value) => ExtractedField::Present(value.clone()),
            None => ExtractedField::Fallback(fallback.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedField {
    Present(Value),
    Fallback(String),
}

impl ExtractedField {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExtractedField::Fallback(_))
    }
}

// Values are printed as received: strings unquoted, everything else in
// compact JSON form (so `null` prints as `null`).
impl fmt::Display for ExtractedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedField::Present(Value::String(s)) => f.write_str(s),
            ExtractedField::Present(value) => write!(f, "{}", value),
            ExtractedField::Fallback(sentinel) => f.write_str(sentinel),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> TelemetryRecord {
        TelemetryRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_nested_and_top_level() {
        let rec = record(json!({"instant": {"wind_speed": 3.2}, "rain_1hr": 0.5}));

        assert_eq!(rec.lookup(&["instant", "wind_speed"]).unwrap(), Some(&json!(3.2)));
        assert_eq!(rec.lookup(&["rain_1hr"]).unwrap(), Some(&json!(0.5)));
        assert_eq!(rec.lookup(&["instant", "wind_dir"]).unwrap(), None);
        assert_eq!(rec.lookup(&["2min", "wind_speed"]).unwrap(), None);
    }

    #[test]
    fn test_field_falls_back_only_when_missing() {
        let rec = record(json!({"rain_1hr": null, "last_rain": "soon"}));

        assert_eq!(
            rec.field(&["2min", "wind_speed"], "?").unwrap(),
            ExtractedField::Fallback("?".to_string())
        );
        assert_eq!(rec.field(&["rain_1hr"], "?").unwrap(), ExtractedField::Present(Value::Null));
        assert_eq!(rec.field(&["last_rain"], "?").unwrap().to_string(), "soon");
        assert_eq!(rec.field(&["rain_1hr"], "?").unwrap().to_string(), "null");
    }

    #[test]
    fn test_group_with_wrong_shape_is_an_error() {
        let rec = record(json!({"instant": 5, "2min": null}));

        let err = rec.lookup(&["instant", "wind_speed"]).unwrap_err();
        assert!(matches!(err, ReportError::Operation(ref msg) if msg.contains("'instant' is a number")));

        let err = rec.lookup(&["2min", "wind_speed"]).unwrap_err();
        assert!(matches!(err, ReportError::Operation(ref msg) if msg.contains("'2min' is null")));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(TelemetryRecord::from_value(json!([1, 2])).is_err());
        assert!(TelemetryRecord::from_value(json!(42)).is_err());
        assert!(TelemetryRecord::from_value(json!({})).is_ok());
    }

    #[test]
    fn test_raw_line_text() {
        assert_eq!(RawLine::from("  {\"a\":1}\r\n").text().unwrap(), "{\"a\":1}");
        assert_eq!(RawLine::default().text().unwrap(), "");

        let invalid = RawLine::new(vec![0x7b, 0xff, 0xfe, 0x7d]);
        assert!(matches!(invalid.text(), Err(ReportError::Operation(_))));
    }

    #[test]
    fn test_display_of_present_values() {
        assert_eq!(ExtractedField::Present(json!(180)).to_string(), "180");
        assert_eq!(ExtractedField::Present(json!(2.9)).to_string(), "2.9");
        assert_eq!(ExtractedField::Present(json!([1, 2])).to_string(), "[1,2]");
    }
}
