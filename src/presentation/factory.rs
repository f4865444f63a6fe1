//! Orchestrator Factory
//!
//! Wires the orchestrator to its real infrastructure.
//! This is the dependency injection point for the application.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::application::{Orchestrator, OrchestratorOptions};
use crate::config::Preferences;
use crate::domain::ports::AssetSink;
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{ProtosyncError, ProtosyncResult};
use crate::infrastructure::{ProcessCompiler, TomlConfigStore};

/// Orchestrator backed by TOML configs and a real `protoc` process
pub type ConcreteOrchestrator<A> = Orchestrator<TomlConfigStore, ProcessCompiler, A>;

/// Command-line overrides applied on top of the project and preferences
#[derive(Debug, Clone, Default)]
pub struct FactoryOptions {
    pub source_dir: Option<PathBuf>,
    pub protoc: Option<PathBuf>,
}

/// Create an orchestrator for `project_root` using the user's preferences.
pub fn create_orchestrator<A: AssetSink>(
    project_root: &Path,
    overrides: &FactoryOptions,
    sink: A,
) -> ProtosyncResult<ConcreteOrchestrator<A>> {
    create_orchestrator_with_preferences(
        project_root,
        overrides,
        Preferences::load_or_default(),
        sink,
    )
}

/// Create an orchestrator with explicit preferences.
///
/// An explicit `protoc` override wins over the preferences file.
pub fn create_orchestrator_with_preferences<A: AssetSink>(
    project_root: &Path,
    overrides: &FactoryOptions,
    mut preferences: Preferences,
    sink: A,
) -> ProtosyncResult<ConcreteOrchestrator<A>> {
    let project_root = fs::canonicalize(project_root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProtosyncError::DirectoryNotFound {
            path: project_root.to_path_buf(),
        },
        _ => ProtosyncError::Io(e),
    })?;

    if let Some(protoc) = &overrides.protoc {
        preferences.protoc = Some(protoc.clone());
    }

    let ignore = IgnorePatterns::load(&project_root)?;
    if !ignore.is_empty() {
        tracing::debug!("loaded {} ignore pattern(s)", ignore.pattern_count());
    }

    let mut options = OrchestratorOptions::new(&project_root)
        .with_preferences(preferences)
        .with_ignore(ignore);
    if let Some(dir) = &overrides.source_dir {
        options = options.with_source_root(dir);
        if !options.source_root.is_dir() {
            return Err(ProtosyncError::DirectoryNotFound {
                path: options.source_root,
            });
        }
    }

    Ok(Orchestrator::new(
        options,
        TomlConfigStore::new(&project_root),
        ProcessCompiler::new(),
        sink,
    ))
}
