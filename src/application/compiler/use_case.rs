//! Target Invocation Engine
//!
//! Compiles one schema file for every target its config enables:
//! 1. Validate the path (inside the source root, `.proto` extension)
//! 2. Expand the config into targets
//! 3. Per target: lock the output directory, run the compiler, classify,
//!    post-process and register generated files
//!
//! Nothing touches the file system or spawns a process before validation
//! passes, and a failing target never stops the targets after it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use crate::config::{CompilationConfig, LocatedConfig, Preferences};
use crate::domain::entities::{
    CompilationResult, CompilationTarget, CompilerArgs, IncludeSet, TargetOutcome, TargetStatus,
};
use crate::domain::ports::{AssetSink, CompilerOutput, CompilerRunner, ConfigStore};
use crate::domain::services::{
    build_include_set, discover_sources, enabled_targets, ConfigResolver,
};
use crate::domain::value_objects::path::{base_name, ensure_within, has_schema_extension};
use crate::error::{ProtosyncError, ProtosyncResult};
use crate::infrastructure::compiler::ProtocLocator;
use crate::infrastructure::fs::{acquire, OutputDirLocks};

use super::options::OrchestratorOptions;
use super::postprocess;

/// Compilation orchestrator for one project
///
/// Parameterized by its ports so tests can swap in fakes. The compiler
/// binary is located on first use and memoized for the lifetime of the
/// instance.
pub struct Orchestrator<S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    pub(crate) options: OrchestratorOptions,
    pub(crate) store: S,
    pub(crate) runner: C,
    pub(crate) sink: A,
    protoc: OnceLock<PathBuf>,
    locks: OutputDirLocks,
}

impl<S, C, A> Orchestrator<S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    pub fn new(options: OrchestratorOptions, store: S, runner: C, sink: A) -> Self {
        Self {
            options,
            store,
            runner,
            sink,
            protoc: OnceLock::new(),
            locks: OutputDirLocks::new(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.options.project_root
    }

    pub fn source_root(&self) -> &Path {
        &self.options.source_root
    }

    pub fn preferences(&self) -> &Preferences {
        &self.options.preferences
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// The compiler binary, located once per orchestrator
    pub fn protoc_path(&self) -> &Path {
        self.protoc.get_or_init(|| {
            let path = ProtocLocator::new(
                &self.options.project_root,
                self.options.preferences.protoc.clone(),
            )
            .locate();
            tracing::debug!("using compiler {}", path.display());
            path
        })
    }

    /// Every schema file under the source root, minus ignored paths
    pub fn discover(&self) -> ProtosyncResult<Vec<PathBuf>> {
        discover_sources(&self.options.source_root, &self.options.ignore)
    }

    /// Include set built from a fresh discovery pass
    pub fn include_set(&self) -> ProtosyncResult<IncludeSet> {
        Ok(build_include_set(&self.discover()?))
    }

    /// The config governing `source`, if any
    pub fn resolve_config(&self, source: &Path) -> ProtosyncResult<Option<LocatedConfig>> {
        ConfigResolver::new(&self.store, self.options.project_root.as_path()).resolve(source)
    }

    /// Targets `config` enables for `source`
    pub fn targets_for(&self, source: &Path, config: &CompilationConfig) -> Vec<CompilationTarget> {
        enabled_targets(config, source, &self.options.project_root)
    }

    /// Resolve the config for `source` and compile it.
    ///
    /// Fails with `ConfigNotFound` when no config applies.
    pub fn compile_path(
        &self,
        source: &Path,
        includes: &IncludeSet,
    ) -> ProtosyncResult<CompilationResult> {
        let source = ensure_within(source, &self.options.source_root)?;
        let located =
            self.resolve_config(&source)?
                .ok_or_else(|| ProtosyncError::ConfigNotFound {
                    path: source.clone(),
                })?;
        self.compile(&source, &located.config, includes)
    }

    /// Compile `source` for every target `config` enables.
    pub fn compile(
        &self,
        source: &Path,
        config: &CompilationConfig,
        includes: &IncludeSet,
    ) -> ProtosyncResult<CompilationResult> {
        let source = ensure_within(source, &self.options.source_root)?;
        if !has_schema_extension(&source) {
            return Err(ProtosyncError::InvalidSourceExtension { path: source });
        }

        if !config.enabled {
            tracing::debug!("compilation disabled for {}", source.display());
            return Ok(CompilationResult::disabled(source));
        }

        let base = base_name(&source);
        let outcomes = self
            .targets_for(&source, config)
            .iter()
            .map(|target| self.compile_target(&source, target, includes, &base))
            .collect();

        let result = CompilationResult::from_targets(source, outcomes);
        if self.options.preferences.log_debug {
            tracing::info!("compiled {}", result.source.display());
        }
        Ok(result)
    }

    fn compile_target(
        &self,
        source: &Path,
        target: &CompilationTarget,
        includes: &IncludeSet,
        base: &str,
    ) -> TargetOutcome {
        let prefs = &self.options.preferences;
        let args = CompilerArgs::new(target.language, &target.output_dir, includes, source);
        let mut outcome = TargetOutcome {
            language: target.language,
            output_dir: target.output_dir.clone(),
            arguments: args.render(),
            status: TargetStatus::Succeeded,
            stdout: String::new(),
            stderr: String::new(),
            produced: Vec::new(),
            post_process_error: None,
        };

        let lock = self.locks.lock_for(&target.output_dir);
        let _guard = acquire(&lock);

        if let Err(e) = fs::create_dir_all(&target.output_dir) {
            let message = format!(
                "cannot create output directory {}: {}",
                target.output_dir.display(),
                e
            );
            if prefs.log_errors {
                tracing::error!("{}", message);
            }
            outcome.status = TargetStatus::LaunchFailed { message };
            return outcome;
        }

        let expected = target.expected_outputs(source, includes);
        let before: Vec<Option<FileStamp>> = expected.iter().map(|p| file_stamp(p)).collect();

        let protoc = self.protoc_path();
        if prefs.log_debug {
            tracing::info!("{} {}", protoc.display(), outcome.arguments);
        }

        match self.runner.run(protoc, &args.argv()) {
            Err(e) => {
                let err = ProtosyncError::CompilerLaunch {
                    binary: protoc.to_path_buf(),
                    message: e.to_string(),
                };
                if prefs.log_errors {
                    tracing::error!("{}", err);
                }
                outcome.status = TargetStatus::LaunchFailed {
                    message: err.to_string(),
                };
                return outcome;
            }
            Ok(CompilerOutput { stdout, stderr, .. }) => {
                if prefs.log_debug && !stdout.is_empty() {
                    tracing::info!("{}", stdout);
                }
                if !stderr.is_empty() {
                    if prefs.log_errors {
                        let err = ProtosyncError::CompilerDiagnostic {
                            source_file: source.to_path_buf(),
                            stderr: stderr.clone(),
                        };
                        tracing::error!("{}", err);
                    }
                    outcome.status = TargetStatus::Diagnostic;
                }
                outcome.stdout = stdout;
                outcome.stderr = stderr;
            }
        }

        if outcome.is_success() {
            if let Some(post_processor) = target.post_processor {
                let generated_dir = target.generated_dir(source, includes);
                match postprocess::apply(post_processor, &generated_dir, base) {
                    Ok(path) => tracing::debug!("post-processed {}", path.display()),
                    Err(e) => {
                        if prefs.log_errors {
                            tracing::error!("{}", e);
                        }
                        outcome.post_process_error = Some(e.to_string());
                    }
                }
            }
        }

        // Leftovers from earlier runs are not this invocation's output
        if outcome.is_success() {
            for (path, old) in expected.into_iter().zip(before) {
                let new = file_stamp(&path);
                if new.is_some() && new != old {
                    self.sink.register_generated_file(&path);
                    outcome.produced.push(path);
                }
            }
        }

        outcome
    }
}

/// Modification time and length of a regular file
type FileStamp = (SystemTime, u64);

fn file_stamp(path: &Path) -> Option<FileStamp> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    Some((modified, meta.len()))
}
