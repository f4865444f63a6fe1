//! Configuration module for protosync
//!
//! Two independent layers:
//! 1. Compilation configs (`CompilationConfig`), read from TOML files in the
//!    project. A directory-scoped config overrides the project-wide one.
//! 2. User preferences (`Preferences`), read from the user config directory
//!    with `PROTOSYNC_*` environment overrides.

mod loader;
mod types;

pub use loader::{preferences_path, ConfigWarning};
pub use types::{
    CompilationConfig, ConfigScope, LanguageConfig, LocatedConfig, Preferences, PythonConfig,
    TargetSettings,
};
