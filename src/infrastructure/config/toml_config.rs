//! TOML-based config store implementation.
//!
//! Layout inside a project:
//! - `<root>/.protosync/config.toml` - the project-wide config
//! - `protosync.toml` or `<name>.protosync.toml` in any directory - a config
//!   scoped to that directory and everything below it

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{CompilationConfig, ConfigScope, LocatedConfig};
use crate::domain::ports::ConfigStore;
use crate::error::ProtosyncResult;

/// Project-wide config, relative to the project root
pub const PROJECT_CONFIG_PATH: &str = ".protosync/config.toml";

/// File name of a scoped config
pub const SCOPED_CONFIG_NAME: &str = "protosync.toml";

/// Suffix of additional named scoped configs
pub const SCOPED_CONFIG_SUFFIX: &str = ".protosync.toml";

/// Returns true if `name` is the file name of a scoped config.
pub fn is_scoped_config_name(name: &str) -> bool {
    name == SCOPED_CONFIG_NAME || name.ends_with(SCOPED_CONFIG_SUFFIX)
}

/// Reads configs from TOML files on every lookup (no caching, configs may
/// change between compiles).
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    project_root: PathBuf,
}

impl TomlConfigStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_root.join(PROJECT_CONFIG_PATH)
    }

    fn load(&self, path: &Path, scope: ConfigScope) -> ProtosyncResult<LocatedConfig> {
        let (config, warnings) = CompilationConfig::load_with_warnings(path)?;
        for w in warnings {
            match (&w.line, &w.suggestion) {
                (Some(line), Some(s)) => tracing::warn!(
                    "unknown config key '{}' in {}:{} (did you mean '{}'?)",
                    w.key,
                    w.file.display(),
                    line,
                    s
                ),
                _ => tracing::warn!("unknown config key '{}' in {}", w.key, w.file.display()),
            }
        }
        Ok(LocatedConfig {
            path: path.to_path_buf(),
            scope,
            config,
        })
    }
}

impl ConfigStore for TomlConfigStore {
    fn find_project_wide(&self) -> ProtosyncResult<Option<LocatedConfig>> {
        let path = self.project_config_path();
        if !path.is_file() {
            return Ok(None);
        }
        self.load(&path, ConfigScope::ProjectWide).map(Some)
    }

    fn find_scoped(&self, dir: &Path) -> ProtosyncResult<Vec<LocatedConfig>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut configs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let is_config = name.to_str().map(is_scoped_config_name).unwrap_or(false);
            if is_config && entry.file_type()?.is_file() {
                configs.push(self.load(
                    &entry.path(),
                    ConfigScope::Scoped {
                        dir: dir.to_path_buf(),
                    },
                )?);
            }
        }
        Ok(configs)
    }
}
