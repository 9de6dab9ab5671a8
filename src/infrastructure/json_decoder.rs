// JSON decoding of WR-01 output lines
use crate::domain::error::ReportError;
use crate::domain::telemetry::TelemetryRecord;
use serde_json::Value;

/// Parse one trimmed line into a record.
pub fn decode_record(text: &str) -> Result<TelemetryRecord, ReportError> {
    let value: Value = serde_json::from_str(text)?;
    TelemetryRecord::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_record() {
        let record = decode_record(r#"{"instant":{"wind_speed":3.2},"last_rain":12}"#).unwrap();
        assert_eq!(
            record.lookup(&["instant", "wind_speed"]).unwrap(),
            Some(&serde_json::json!(3.2))
        );
    }

    #[test]
    fn test_malformed_text_is_decode_error() {
        let err = decode_record(r#"{"instant":{"wind_speed":3.2"#).unwrap_err();
        assert!(matches!(err, ReportError::Decode(_)));
        assert!(err.to_string().starts_with("JSON parse error: "));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_well_formed_non_object_is_operation_error() {
        assert!(matches!(decode_record("[1,2,3]"), Err(ReportError::Operation(_))));
        assert!(matches!(decode_record("\"hello\""), Err(ReportError::Operation(_))));
    }
}
