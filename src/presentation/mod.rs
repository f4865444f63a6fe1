//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the orchestrator with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line interface definition
//! - `factory` - Wires the orchestrator to TOML configs and a real `protoc`
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use protosync::infrastructure::LoggingAssetSink;
//! use protosync::presentation::factory::{create_orchestrator, FactoryOptions};
//!
//! let orchestrator = create_orchestrator(root, &FactoryOptions::default(), LoggingAssetSink::new())?;
//! let report = orchestrator.force_recompile_all(1)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::{create_orchestrator, ConcreteOrchestrator, FactoryOptions};
pub use output::{create_renderer, OutputFormat, Renderer};
