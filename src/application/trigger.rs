//! Change-Trigger Adapter
//!
//! Batch entry points on top of the orchestrator: a set of changed paths
//! from the host, or a forced rebuild of every schema in the source root.
//! Either way the asset sink is asked to refresh at most once per batch,
//! after all compilation has finished.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::domain::entities::{BatchReport, CompilationResult, IncludeSet, SkipReason};
use crate::domain::ports::{AssetSink, CompilerRunner, ConfigStore};
use crate::domain::services::build_include_set;
use crate::domain::value_objects::path::{absolutize, has_schema_extension};
use crate::error::ProtosyncResult;

use super::compiler::Orchestrator;

/// What happened to one source within a batch
#[derive(Debug)]
enum SourceOutcome {
    Compiled(CompilationResult),
    Skipped(SkipReason),
    Failed(String),
}

impl<S, C, A> Orchestrator<S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    /// Compile every schema file among `paths`.
    ///
    /// Does nothing when the preferences switch compilation off. Relative
    /// paths are resolved against the project root. Per-file errors are
    /// recorded in the report and never stop the batch.
    pub fn on_sources_changed<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let mut report = BatchReport::default();
        if !self.preferences().enabled {
            tracing::debug!("compilation disabled in preferences, ignoring {} path(s)", paths.len());
            return report;
        }

        let mut sources = Vec::new();
        for path in paths {
            let path = absolutize(path.as_ref(), self.project_root());
            if !has_schema_extension(&path) {
                report.skipped.push((path, SkipReason::NotSchema));
            } else if self.options().ignore.is_ignored(&path, false) {
                report.skipped.push((path, SkipReason::Ignored));
            } else if !sources.contains(&path) {
                sources.push(path);
            }
        }

        if sources.is_empty() {
            return report;
        }

        let includes = match self.include_set() {
            Ok(includes) => includes,
            Err(e) => {
                tracing::warn!("discovery failed, using changed files only: {}", e);
                build_include_set(&sources)
            }
        };

        for source in sources {
            let outcome = self.process_source(&source, &includes);
            record(&mut report, source, outcome);
        }

        self.finish_batch(report)
    }

    /// Rebuild every schema under the source root, ignoring preferences and
    /// change detection.
    ///
    /// With `jobs > 1` sources compile on that many worker threads; the
    /// report still lists them in discovery order.
    pub fn force_recompile_all(&self, jobs: usize) -> ProtosyncResult<BatchReport> {
        let sources = self.discover()?;
        let includes = build_include_set(&sources);

        if self.preferences().log_debug {
            tracing::info!("compiling all {} schema file(s)", sources.len());
        }

        let outcomes = if jobs > 1 && sources.len() > 1 {
            self.process_parallel(&sources, &includes, jobs)
        } else {
            sources
                .iter()
                .map(|source| self.process_source(source, &includes))
                .collect()
        };

        let mut report = BatchReport::default();
        for (source, outcome) in sources.into_iter().zip(outcomes) {
            record(&mut report, source, outcome);
        }

        Ok(self.finish_batch(report))
    }

    fn process_source(&self, source: &Path, includes: &IncludeSet) -> SourceOutcome {
        if self.preferences().log_debug {
            tracing::info!("compiling {}", source.display());
        }

        let located = match self.resolve_config(source) {
            Ok(Some(located)) => located,
            Ok(None) => {
                tracing::debug!("no config applies to {}, skipping", source.display());
                return SourceOutcome::Skipped(SkipReason::NoConfig);
            }
            Err(e) => {
                if self.preferences().log_errors {
                    tracing::error!("{}", e);
                }
                return SourceOutcome::Failed(e.to_string());
            }
        };

        match self.compile(source, &located.config, includes) {
            Ok(result) => SourceOutcome::Compiled(result),
            Err(e) => {
                if self.preferences().log_errors {
                    tracing::error!("{}", e);
                }
                SourceOutcome::Failed(e.to_string())
            }
        }
    }

    fn process_parallel(
        &self,
        sources: &[PathBuf],
        includes: &IncludeSet,
        jobs: usize,
    ) -> Vec<SourceOutcome> {
        let next = AtomicUsize::new(0);
        let slots: Vec<Mutex<Option<SourceOutcome>>> =
            sources.iter().map(|_| Mutex::new(None)).collect();
        let workers = jobs.min(sources.len());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(source) = sources.get(index) else {
                        break;
                    };
                    let outcome = self.process_source(source, includes);
                    *slots[index].lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome);
                });
            }
        });

        slots
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .unwrap_or_else(|e| e.into_inner())
                    .unwrap_or_else(|| SourceOutcome::Failed("worker did not finish".to_string()))
            })
            .collect()
    }

    fn finish_batch(&self, report: BatchReport) -> BatchReport {
        if report.changed_any {
            self.sink.refresh_view();
        }
        report
    }
}

fn record(report: &mut BatchReport, source: PathBuf, outcome: SourceOutcome) {
    match outcome {
        SourceOutcome::Compiled(result) => {
            if !result.produced_files().is_empty() {
                report.changed_any = true;
            }
            report.results.push(result);
        }
        SourceOutcome::Skipped(reason) => report.skipped.push((source, reason)),
        SourceOutcome::Failed(message) => report.failures.push((source, message)),
    }
}
