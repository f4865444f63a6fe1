//! Per-output-directory locks
//!
//! Two targets writing into the same directory (two schemas sharing an
//! output folder, or a parallel rebuild) must not interleave their compile
//! and post-process steps. Each directory gets one mutex, created lazily.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::value_objects::path::normalize;

#[derive(Debug, Default)]
pub struct OutputDirLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl OutputDirLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `dir`. Equal directories share one mutex.
    pub fn lock_for(&self, dir: &Path) -> Arc<Mutex<()>> {
        let key = normalize(dir);
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(key).or_default())
    }

    /// Number of distinct directories seen so far
    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

/// Lock a directory mutex, recovering it if a previous holder panicked.
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|e| e.into_inner())
}
