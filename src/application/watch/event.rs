//! Watch event types and debounce state

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Rebuild everything once before watching
    pub build_on_start: bool,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build_on_start(mut self, build_on_start: bool) -> Self {
        self.build_on_start = build_on_start;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted { source: String },
    /// Schema file changed
    FileChanged { path: String },
    /// Batch compile started
    CompileStarted { files: usize },
    /// Batch compile finished
    CompileComplete {
        compiled: usize,
        failed: usize,
        skipped: usize,
        changed: bool,
    },
    /// Error occurred
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
///
/// Pending paths are kept sorted so a batch compiles in a stable order.
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// True once the debounce period has passed with changes pending
    pub fn should_compile(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes).into_iter().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
