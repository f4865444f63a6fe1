//! Applies post-processing policies to files on disk

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::PostProcessor;
use crate::domain::services::postprocess::{rewritten_file, transform};
use crate::error::{ProtosyncError, ProtosyncResult};
use crate::infrastructure::fs::atomic_write;

/// Run `post_processor` over the file generated for `base_name` in
/// `generated_dir`. Returns the rewritten file.
pub(crate) fn apply(
    post_processor: PostProcessor,
    generated_dir: &Path,
    base_name: &str,
) -> ProtosyncResult<PathBuf> {
    let path = generated_dir.join(rewritten_file(post_processor, base_name));
    rewrite_file(&path, transform(post_processor))?;
    Ok(path)
}

fn rewrite_file(path: &Path, transform: fn(&str) -> String) -> ProtosyncResult<()> {
    let post_error = |message: String| ProtosyncError::PostProcess {
        path: path.to_path_buf(),
        message,
    };

    let original = fs::read_to_string(path).map_err(|e| post_error(e.to_string()))?;
    let rewritten = transform(&original);
    if rewritten != original {
        atomic_write(path, rewritten.as_bytes()).map_err(|e| post_error(e.to_string()))?;
    }
    Ok(())
}
