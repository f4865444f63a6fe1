//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Orchestrator` - compiles one schema file for every enabled target
//! - `Orchestrator::on_sources_changed` / `force_recompile_all` - batch entry points
//! - `Orchestrator::explain` - dry run of a single compile
//! - `WatchUseCase` - recompiles on file system changes
//! - `create_schema_file` - new schema files from the built-in template

pub mod compiler;
mod explain;
pub mod template;
mod trigger;
pub mod watch;

pub use compiler::{Orchestrator, OrchestratorOptions};
pub use explain::{Explanation, PlannedTarget};
pub use template::{create_schema_file, DEFAULT_SCHEMA_NAME, PROTOBUF_TEMPLATE};
pub use watch::{
    compute_content_hash, ContentHashes, WatchEvent, WatchOptions, WatchUseCase, WatcherState,
    DEBOUNCE_MS,
};
