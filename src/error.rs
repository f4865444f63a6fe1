//! Error types for protosync
//!
//! Library code returns `ProtosyncError`; the CLI wraps it with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for protosync operations
pub type ProtosyncResult<T> = Result<T, ProtosyncError>;

/// Main error type for protosync operations
#[derive(Error, Debug)]
pub enum ProtosyncError {
    /// Source file does not live under the project's source root
    #[error("'{path}' is outside the source root '{root}'")]
    PathOutsideScope { path: PathBuf, root: PathBuf },

    /// File passed to the compiler is not a schema file
    #[error("'{path}' is not a .proto file")]
    InvalidSourceExtension { path: PathBuf },

    /// No scoped or project-wide configuration applies to the source
    #[error("no compilation config found for '{path}'")]
    ConfigNotFound { path: PathBuf },

    /// The compiler binary could not be started
    #[error("failed to launch compiler '{binary}': {message}")]
    CompilerLaunch { binary: PathBuf, message: String },

    /// The compiler wrote diagnostics to stderr
    #[error("compiler reported errors for '{source_file}':\n{stderr}")]
    CompilerDiagnostic { source_file: PathBuf, stderr: String },

    /// Rewriting generated output failed
    #[error("post-processing '{path}' failed: {message}")]
    PostProcess { path: PathBuf, message: String },

    /// A configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Refused to overwrite an existing file
    #[error("file already exists: {path}")]
    FileExists { path: PathBuf },

    /// Invalid ignore file
    #[error("invalid ignore patterns: {0}")]
    Ignore(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtosyncError {
    /// True for errors that reject a single source before any work is done.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProtosyncError::PathOutsideScope { .. } | ProtosyncError::InvalidSourceExtension { .. }
        )
    }
}
