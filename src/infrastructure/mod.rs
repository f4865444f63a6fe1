//! Infrastructure Layer
//!
//! Concrete implementations of domain ports. All process spawning and file
//! system writes live here.
//!
//! ## Structure
//!
//! - `config/` - TOML config store
//! - `compiler/` - protoc location and process runner
//! - `events/` - asset sinks
//! - `fs/` - atomic writes and output directory locks

pub mod compiler;
pub mod config;
pub mod events;
pub mod fs;

pub use compiler::{ProcessCompiler, ProtocLocator};
pub use config::TomlConfigStore;
pub use events::{JsonAssetSink, LoggingAssetSink, NoopAssetSink};
pub use fs::{atomic_write, OutputDirLocks};
