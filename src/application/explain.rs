//! Dry-run view of a compile: which config governs a schema file and what
//! the compiler would be asked to do, without running it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::LocatedConfig;
use crate::domain::entities::{CompilerArgs, PostProcessor};
use crate::domain::ports::{AssetSink, CompilerRunner, ConfigStore};
use crate::domain::value_objects::path::{absolutize, ensure_within, has_schema_extension};
use crate::domain::value_objects::Language;
use crate::error::{ProtosyncError, ProtosyncResult};

use super::compiler::Orchestrator;

/// One invocation a compile would perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTarget {
    pub language: Language,
    pub output_dir: PathBuf,
    pub arguments: String,
    pub post_processor: Option<PostProcessor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub source: PathBuf,
    pub protoc: PathBuf,
    /// `None` when no config applies
    pub config: Option<LocatedConfig>,
    pub targets: Vec<PlannedTarget>,
}

impl Explanation {
    /// Compilation would run at least one target
    pub fn would_compile(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.config.enabled) && !self.targets.is_empty()
    }
}

impl<S, C, A> Orchestrator<S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    /// Describe what compiling `source` would do.
    ///
    /// Applies the same validation as a real compile. Relative paths are
    /// resolved against the project root.
    pub fn explain(&self, source: &Path) -> ProtosyncResult<Explanation> {
        let source = absolutize(source, self.project_root());
        let source = ensure_within(&source, self.source_root())?;
        if !has_schema_extension(&source) {
            return Err(ProtosyncError::InvalidSourceExtension { path: source });
        }

        let config = self.resolve_config(&source)?;
        let targets = match &config {
            Some(located) if located.config.enabled => {
                let includes = self.include_set()?;
                self.targets_for(&source, &located.config)
                    .into_iter()
                    .map(|target| PlannedTarget {
                        arguments: CompilerArgs::new(
                            target.language,
                            &target.output_dir,
                            &includes,
                            &source,
                        )
                        .render(),
                        language: target.language,
                        output_dir: target.output_dir,
                        post_processor: target.post_processor,
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Ok(Explanation {
            protoc: self.protoc_path().to_path_buf(),
            source,
            config,
            targets,
        })
    }
}
