//! Asset sink port - tells the host about generated files.
//!
//! Has no effect on compilation results; a headless host can ignore it.

use std::path::Path;

/// Receiver of generated-file notifications
pub trait AssetSink: Send + Sync {
    /// A generated file now exists at `path`
    fn register_generated_file(&self, path: &Path);

    /// Called once per batch after all compilation, if anything was registered
    fn refresh_view(&self);
}

/// No-op sink for silent operation
pub struct NoopAssetSink;

impl AssetSink for NoopAssetSink {
    fn register_generated_file(&self, _path: &Path) {}

    fn refresh_view(&self) {}
}
