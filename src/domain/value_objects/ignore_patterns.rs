//! Ignore patterns value object
//!
//! Loads `.protosyncignore` (gitignore syntax) from the project root. Schema
//! files matched by these patterns are never discovered or compiled, which is
//! how vendored or package-managed `.proto` trees are kept out of a build.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProtosyncError, ProtosyncResult};

/// Name of the ignore file looked up in the project root
pub const IGNORE_FILE_NAME: &str = ".protosyncignore";

/// Maximum file size for `.protosyncignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Patterns loaded from a `.protosyncignore` file.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            root: PathBuf::new(),
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load patterns from `<project_root>/.protosyncignore`.
    ///
    /// Returns an empty set if the file doesn't exist.
    pub fn load(project_root: &Path) -> ProtosyncResult<Self> {
        let ignore_path = project_root.join(IGNORE_FILE_NAME);

        if !ignore_path.exists() {
            return Ok(Self::empty());
        }

        let metadata = fs::metadata(&ignore_path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(ProtosyncError::Ignore(format!(
                "{} exceeds {}KB limit ({} bytes)",
                ignore_path.display(),
                MAX_FILE_SIZE / 1024,
                metadata.len()
            )));
        }

        let content = fs::read_to_string(&ignore_path)?;
        Self::from_content(project_root, &ignore_path, &content)
    }

    /// Parse patterns from string content.
    pub fn from_content(root: &Path, source_path: &Path, content: &str) -> ProtosyncResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            pattern_count += 1;

            builder
                .add_line(Some(source_path.to_path_buf()), line)
                .map_err(|e| {
                    ProtosyncError::Ignore(format!(
                        "{}:{}: '{}' - {}",
                        source_path.display(),
                        line_num + 1,
                        line,
                        e
                    ))
                })?;
        }

        let matcher = builder
            .build()
            .map_err(|e| ProtosyncError::Ignore(e.to_string()))?;

        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            pattern_count,
        })
    }

    /// Check if an absolute path should be ignored.
    ///
    /// Paths outside the root the patterns were loaded for never match.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => self
                .matcher
                .matched_path_or_any_parents(rel, is_dir)
                .is_ignore(),
            _ => false,
        }
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
