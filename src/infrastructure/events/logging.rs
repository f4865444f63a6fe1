//! Tracing-backed asset sink used by the interactive CLI

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::ports::AssetSink;

/// Logs generated files and counts them between refreshes
#[derive(Debug, Default)]
pub struct LoggingAssetSink {
    pending: AtomicUsize,
    total: AtomicUsize,
}

impl LoggingAssetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files registered since the sink was created
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }
}

impl AssetSink for LoggingAssetSink {
    fn register_generated_file(&self, path: &Path) {
        self.pending.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("generated {}", path.display());
    }

    fn refresh_view(&self) {
        let count = self.pending.swap(0, Ordering::Relaxed);
        tracing::info!("{} generated file(s) updated", count);
    }
}
