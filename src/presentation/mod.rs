// Presentation layer - Human-readable console output
pub mod console;
