//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_sink;
pub mod compiler_runner;
pub mod config_store;

pub use asset_sink::{AssetSink, NoopAssetSink};
pub use compiler_runner::{CompilerOutput, CompilerRunner};
pub use config_store::ConfigStore;
