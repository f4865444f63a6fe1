//! Content hashes for filtering no-op saves

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// SHA-256 of `content` as `sha256:<hex>`
pub fn compute_content_hash(content: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(content))
}

/// Last seen content hash per schema file
#[derive(Debug, Default)]
pub struct ContentHashes {
    hashes: HashMap<PathBuf, String>,
}

impl ContentHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the current contents of `paths` (unreadable files are skipped)
    pub fn seed(paths: &[PathBuf]) -> Self {
        let mut cache = Self::new();
        for path in paths {
            if let Ok(content) = std::fs::read(path) {
                cache.record(path, &content);
            }
        }
        cache
    }

    /// Record `content` for `path`; true if it differs from what was seen before.
    pub fn record(&mut self, path: &Path, content: &[u8]) -> bool {
        let hash = compute_content_hash(content);
        match self.hashes.get(path) {
            Some(old) if *old == hash => false,
            _ => {
                self.hashes.insert(path.to_path_buf(), hash);
                true
            }
        }
    }

    /// Forget a deleted file
    pub fn remove(&mut self, path: &Path) {
        self.hashes.remove(path);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.hashes.len()
    }
}
