//! Locating the protoc binary
//!
//! Order: explicit path (preferences, env or `--protoc`), then a copy bundled
//! with the project under `tools/protoc/<os>-<arch>/`, then `protoc` on PATH.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::path::absolutize;

/// Directory holding bundled compilers, relative to the project root
pub const BUNDLED_DIR: &str = "tools/protoc";

/// Executable name for the current platform
pub fn binary_name() -> &'static str {
    if cfg!(windows) {
        "protoc.exe"
    } else {
        "protoc"
    }
}

/// `<os>-<arch>` directory name, e.g. `linux-x86_64` or `macos-aarch64`
pub fn platform_dir() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

#[derive(Debug, Clone)]
pub struct ProtocLocator {
    project_root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ProtocLocator {
    pub fn new(project_root: impl Into<PathBuf>, explicit: Option<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            explicit,
        }
    }

    /// Path of the bundled compiler for this platform (may not exist)
    pub fn bundled_path(&self) -> PathBuf {
        self.project_root
            .join(BUNDLED_DIR)
            .join(platform_dir())
            .join(binary_name())
    }

    /// Resolve the binary to run.
    ///
    /// Never fails: a missing binary surfaces later as a launch error.
    pub fn locate(&self) -> PathBuf {
        if let Some(explicit) = &self.explicit {
            return resolve_explicit(explicit, &self.project_root);
        }

        let bundled = self.bundled_path();
        if bundled.is_file() {
            return bundled;
        }

        PathBuf::from(binary_name())
    }
}

/// Bare names are looked up on PATH; other relative paths are project-relative.
fn resolve_explicit(explicit: &Path, project_root: &Path) -> PathBuf {
    if explicit.components().count() <= 1 {
        return explicit.to_path_buf();
    }
    absolutize(explicit, project_root)
}
