//! protosync - protobuf compilation orchestrator
//!
//! Finds `.proto` schema files in a project, resolves which compilation
//! config governs each one, and runs `protoc` once per enabled target
//! language. Generated Python can be rewritten to package-relative imports.
//! Batches of changed files, full rebuilds and a file watcher all go
//! through the same [`Orchestrator`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{Orchestrator, OrchestratorOptions};
pub use config::{CompilationConfig, Preferences};
pub use domain::entities::{BatchReport, CompilationResult, TargetOutcome, TargetStatus};
pub use domain::value_objects::Language;
pub use error::{ProtosyncError, ProtosyncResult};
