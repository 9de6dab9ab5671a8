// Domain layer - Sensor records, extracted fields and reports
pub mod error;
pub mod report;
pub mod telemetry;
