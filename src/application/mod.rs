// Application layer - Line source contract and the reporting loop
pub mod line_source;
pub mod reporter_service;
