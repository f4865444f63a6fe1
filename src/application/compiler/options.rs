//! Orchestrator options

use std::path::{Path, PathBuf};

use crate::config::Preferences;
use crate::domain::value_objects::path::absolutize;
use crate::domain::value_objects::IgnorePatterns;

/// Where a project lives and how its compiles are logged
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Root that configs, output paths and the bundled compiler are relative to
    pub project_root: PathBuf,
    /// Only schemas below this directory are discovered or compiled
    pub source_root: PathBuf,
    pub preferences: Preferences,
    pub ignore: IgnorePatterns,
}

impl OrchestratorOptions {
    /// Options with the source root equal to the project root
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            source_root: project_root.clone(),
            project_root,
            preferences: Preferences::default(),
            ignore: IgnorePatterns::empty(),
        }
    }

    /// Restrict discovery to `dir`; relative paths are project-relative
    pub fn with_source_root(mut self, dir: &Path) -> Self {
        self.source_root = absolutize(dir, &self.project_root);
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_ignore(mut self, ignore: IgnorePatterns) -> Self {
        self.ignore = ignore;
        self
    }
}
