//! Path algebra for schema sources
//!
//! Absolute/relative conversion and containment checks against the
//! project's source root. All checks are lexical: `.` and `..` components
//! are folded before comparing, the filesystem is never consulted.

use std::path::{Component, Path, PathBuf};

use crate::error::{ProtosyncError, ProtosyncResult};

/// Extension (without dot) of schema source files
pub const SCHEMA_EXTENSION: &str = "proto";

/// Returns true if the path names a schema source file.
pub fn has_schema_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e == SCHEMA_EXTENSION)
        .unwrap_or(false)
}

/// Lexically normalize a path, folding `.` and `..` components.
///
/// A `..` that would climb above the root of an absolute path is dropped;
/// leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` if it is relative, then normalize.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// True if `path` equals `root` or lies below it.
pub fn is_within(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Express `path` relative to `root`, or `None` if it is not inside it.
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    normalize(path)
        .strip_prefix(normalize(root))
        .ok()
        .map(Path::to_path_buf)
}

/// Ensure `path` lies inside `root`, returning its normalized form.
pub fn ensure_within(path: &Path, root: &Path) -> ProtosyncResult<PathBuf> {
    let normalized = normalize(path);
    if path.is_absolute() && normalized.starts_with(normalize(root)) {
        Ok(normalized)
    } else {
        Err(ProtosyncError::PathOutsideScope {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
    }
}

/// Base name of a source file without its extension (`msg.proto` → `msg`).
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
