// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod json_decoder;
pub mod replay_source;
pub mod serial_source;
