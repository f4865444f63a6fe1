//! Local file system helpers

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ProtosyncResult;

/// Replace `path` with `content` atomically.
///
/// The content is written to a temporary file in the same directory and
/// renamed over the target, so readers see either the old or the new file.
pub fn atomic_write(path: &Path, content: &[u8]) -> ProtosyncResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
