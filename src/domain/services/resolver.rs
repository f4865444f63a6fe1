//! Configuration resolver
//!
//! Picks the config that governs a schema file and expands it into the
//! targets to compile:
//! - nearest scoped config, searching from the file's directory up to the
//!   project root (narrowest scope wins)
//! - else the project-wide config
//! - else nothing (the file is skipped)

use std::path::{Path, PathBuf};

use crate::config::{CompilationConfig, LocatedConfig};
use crate::domain::entities::{CompilationTarget, PostProcessor};
use crate::domain::ports::ConfigStore;
use crate::domain::value_objects::path::{absolutize, is_within};
use crate::domain::value_objects::Language;
use crate::error::ProtosyncResult;

/// Resolves the governing config for schema files of one project
pub struct ConfigResolver<'a, S: ConfigStore + ?Sized> {
    store: &'a S,
    project_root: PathBuf,
}

impl<'a, S: ConfigStore + ?Sized> ConfigResolver<'a, S> {
    pub fn new(store: &'a S, project_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            project_root: project_root.into(),
        }
    }

    /// Config for `source`, or `None` if neither a scoped nor a project-wide
    /// config applies.
    ///
    /// When one directory holds several scoped configs the one with the
    /// lexicographically smallest storage path wins.
    pub fn resolve(&self, source: &Path) -> ProtosyncResult<Option<LocatedConfig>> {
        let mut dir = source.parent();

        while let Some(current) = dir {
            if !is_within(current, &self.project_root) {
                break;
            }

            let mut candidates = self.store.find_scoped(current)?;
            if !candidates.is_empty() {
                candidates.sort_by(|a, b| a.path.cmp(&b.path));
                if candidates.len() > 1 {
                    tracing::warn!(
                        "{} configs in {}, using {}",
                        candidates.len(),
                        current.display(),
                        candidates[0].path.display()
                    );
                }
                return Ok(candidates.into_iter().next());
            }

            if current == self.project_root.as_path() {
                break;
            }
            dir = current.parent();
        }

        self.store.find_project_wide()
    }
}

/// Targets to compile for `source` under `config`, in invocation order.
///
/// Empty when the master switch is off. An empty configured output path puts
/// generated files next to the source; anything else is resolved against the
/// project root.
pub fn enabled_targets(
    config: &CompilationConfig,
    source: &Path,
    project_root: &Path,
) -> Vec<CompilationTarget> {
    config
        .enabled_languages()
        .into_iter()
        .map(|language| {
            let settings = config.target_settings(language);
            let output_dir = output_dir_for(settings.output, source, project_root);
            let target = CompilationTarget::new(language, output_dir);
            if language == Language::Python && settings.localize_imports {
                target.with_post_processor(PostProcessor::LocalizePythonImports)
            } else {
                target
            }
        })
        .collect()
}

fn output_dir_for(configured: &str, source: &Path, project_root: &Path) -> PathBuf {
    let configured = configured.trim();
    if configured.is_empty() {
        source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_root.to_path_buf())
    } else {
        absolutize(Path::new(configured), project_root)
    }
}
