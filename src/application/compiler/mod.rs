//! Compile use case
//!
//! `Orchestrator` owns one project's ports and compiles schema files
//! against their resolved configs. Batch entry points live in
//! `application::trigger`.

mod options;
mod postprocess;
mod use_case;


pub use options::OrchestratorOptions;
pub use use_case::Orchestrator;
