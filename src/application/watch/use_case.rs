//! Watch Use Case implementation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::compiler::Orchestrator;
use crate::domain::entities::{BatchReport, TargetStatus};
use crate::domain::ports::{AssetSink, CompilerRunner, ConfigStore};
use crate::domain::value_objects::path::has_schema_extension;
use crate::error::{ProtosyncError, ProtosyncResult};

use super::cache::ContentHashes;
use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Watch Use Case
///
/// Feeds file system changes under the source root into
/// `Orchestrator::on_sources_changed`. This is the entry point for the
/// `protosync watch` command.
pub struct WatchUseCase<'a, S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    orchestrator: &'a Orchestrator<S, C, A>,
    options: WatchOptions,
}

impl<'a, S, C, A> WatchUseCase<'a, S, C, A>
where
    S: ConfigStore,
    C: CompilerRunner,
    A: AssetSink,
{
    pub fn new(orchestrator: &'a Orchestrator<S, C, A>, options: WatchOptions) -> Self {
        Self {
            orchestrator,
            options,
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching (blocking)
    ///
    /// Returns once `running` is cleared.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> ProtosyncResult<()>
    where
        F: Fn(WatchEvent),
    {
        let source_root = self.orchestrator.source_root().to_path_buf();
        on_event(WatchEvent::WatchStarted {
            source: source_root.display().to_string(),
        });

        if self.options.build_on_start {
            on_event(WatchEvent::CompileStarted { files: 0 });
            match self.orchestrator.force_recompile_all(1) {
                Ok(report) => emit_report(&report, &on_event),
                Err(e) => on_event(WatchEvent::Error {
                    message: e.to_string(),
                }),
            }
        }

        let mut hashes = ContentHashes::seed(&self.orchestrator.discover().unwrap_or_default());

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| ProtosyncError::Io(std::io::Error::other(e.to_string())))?;

        watcher
            .watch(&source_root, RecursiveMode::Recursive)
            .map_err(|e| ProtosyncError::Io(std::io::Error::other(e.to_string())))?;

        // notify may replay events for existing files right after registration
        let cooldown_end = Instant::now() + Duration::from_millis(500);
        while Instant::now() < cooldown_end {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        let mut state = WatcherState::new();
        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if self.is_watched(&path) {
                    match std::fs::read(&path) {
                        Ok(content) => {
                            if hashes.record(&path, &content) {
                                state.add_change(path);
                            }
                        }
                        Err(e) if e.kind() == ErrorKind::NotFound => hashes.remove(&path),
                        Err(e) => tracing::debug!("cannot read {}: {}", path.display(), e),
                    }
                }
            }

            if state.should_compile() {
                let changes = state.take_changes();
                for path in &changes {
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                self.compile_batch(&changes, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// Schema files under the source root that are not ignored
    pub fn is_watched(&self, path: &Path) -> bool {
        has_schema_extension(path)
            && path.starts_with(self.orchestrator.source_root())
            && !self.orchestrator.options().ignore.is_ignored(path, false)
    }

    /// Compile one debounced batch and report it.
    pub fn compile_batch(&self, changes: &[PathBuf], on_event: &impl Fn(WatchEvent)) -> BatchReport {
        on_event(WatchEvent::CompileStarted {
            files: changes.len(),
        });
        let report = self.orchestrator.on_sources_changed(changes);
        emit_report(&report, on_event);
        report
    }
}

fn emit_report(report: &BatchReport, on_event: &impl Fn(WatchEvent)) {
    for (path, message) in &report.failures {
        on_event(WatchEvent::Error {
            message: format!("{}: {}", path.display(), message),
        });
    }
    for result in &report.results {
        for target in &result.targets {
            let detail = match (&target.status, &target.post_process_error) {
                (TargetStatus::LaunchFailed { message }, _) => message.clone(),
                (TargetStatus::Diagnostic, _) => target.stderr.trim_end().to_string(),
                (TargetStatus::Succeeded, Some(message)) => message.clone(),
                (TargetStatus::Succeeded, None) => continue,
            };
            on_event(WatchEvent::Error {
                message: format!("{} ({}): {}", result.source.display(), target.language, detail),
            });
        }
    }
    on_event(WatchEvent::CompileComplete {
        compiled: report.compiled(),
        failed: report.failed_targets() + report.failures.len(),
        skipped: report.skipped.len(),
        changed: report.changed_any,
    });
}
