//! Asset sink implementations
//!
//! - `LoggingAssetSink`: tracing output for interactive use
//! - `JsonAssetSink`: NDJSON output for editor integrations
//! - `NoopAssetSink`: headless runs

mod json;
mod logging;

pub use crate::domain::ports::NoopAssetSink;
pub use json::JsonAssetSink;
pub use logging::LoggingAssetSink;
