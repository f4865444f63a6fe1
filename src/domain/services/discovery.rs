//! Source discovery
//!
//! Enumerates schema files under a root and derives the include set.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::IncludeSet;
use crate::domain::value_objects::path::has_schema_extension;
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{ProtosyncError, ProtosyncResult};

/// Every `.proto` file below `root`, in sorted traversal order.
///
/// Paths matched by `ignore` are skipped (ignored directories are not
/// descended into). Unreadable subdirectories are logged and skipped; only an
/// unreadable root is an error.
pub fn discover_sources(root: &Path, ignore: &IgnorePatterns) -> ProtosyncResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ProtosyncError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    fs::read_dir(root)?;

    let patterns = ignore.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !patterns.is_ignored(entry.path(), is_dir)
        })
        .build();

    let mut sources = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && has_schema_extension(entry.path()) {
            sources.push(entry.into_path());
        }
    }

    tracing::debug!("discovered {} schema files under {}", sources.len(), root.display());
    Ok(sources)
}

/// Parent directory of every source, deduplicated in first-seen order.
pub fn build_include_set(sources: &[PathBuf]) -> IncludeSet {
    IncludeSet::from_sources(sources)
}
