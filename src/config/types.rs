//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Language;
use crate::error::ProtosyncResult;

use super::loader::{self, ConfigWarning};

fn default_true() -> bool {
    true
}

/// Settings shared by every language table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Output directory relative to the project root; empty means next to the source
    #[serde(default)]
    pub output: String,
}

/// Python table, which adds import localization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub output: String,

    /// Rewrite `import x` to `from . import x` and `from google` to `from . google`
    #[serde(default)]
    pub localize_imports: bool,
}

/// Borrowed view of one language's settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSettings<'a> {
    pub enabled: bool,
    pub output: &'a str,
    pub localize_imports: bool,
}

/// A compilation config file
///
/// ```toml
/// enabled = true
///
/// [csharp]
/// enabled = true
/// output = "Assets/Generated"
///
/// [python]
/// enabled = true
/// localize_imports = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationConfig {
    /// Master switch; when false no language is compiled
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub csharp: LanguageConfig,

    #[serde(default)]
    pub go: LanguageConfig,

    #[serde(default)]
    pub python: PythonConfig,

    #[serde(default)]
    pub cpp: LanguageConfig,
}

impl Default for CompilationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            csharp: LanguageConfig::default(),
            go: LanguageConfig::default(),
            python: PythonConfig::default(),
            cpp: LanguageConfig::default(),
        }
    }
}

impl CompilationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProtosyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProtosyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Settings for one language
    pub fn target_settings(&self, language: Language) -> TargetSettings<'_> {
        let (enabled, output, localize_imports) = match language {
            Language::CSharp => (self.csharp.enabled, self.csharp.output.as_str(), false),
            Language::Go => (self.go.enabled, self.go.output.as_str(), false),
            Language::Python => (
                self.python.enabled,
                self.python.output.as_str(),
                self.python.localize_imports,
            ),
            Language::Cpp => (self.cpp.enabled, self.cpp.output.as_str(), false),
        };
        TargetSettings {
            enabled,
            output,
            localize_imports,
        }
    }

    /// Languages whose own flag is set, in invocation order.
    ///
    /// Empty when the master switch is off.
    pub fn enabled_languages(&self) -> Vec<Language> {
        if !self.enabled {
            return Vec::new();
        }
        Language::ALL
            .into_iter()
            .filter(|l| self.target_settings(*l).enabled)
            .collect()
    }
}

/// Where a config was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigScope {
    /// The single project-wide default
    ProjectWide,
    /// Applies to schemas in `dir` and below
    Scoped { dir: PathBuf },
}

/// A config together with its storage location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedConfig {
    pub path: PathBuf,
    pub scope: ConfigScope,
    pub config: CompilationConfig,
}

/// User preferences (`~/.config/protosync/preferences.toml`)
///
/// These only gate logging and the change-batch master switch; they never
/// change how a source is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Compile on change events at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log compiler stderr
    #[serde(default = "default_true")]
    pub log_errors: bool,

    /// Log compiler stdout, arguments and per-file progress
    #[serde(default)]
    pub log_debug: bool,

    /// Explicit compiler binary
    #[serde(default)]
    pub protoc: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enabled: true,
            log_errors: true,
            log_debug: false,
            protoc: None,
        }
    }
}

impl Preferences {
    /// Load from a TOML file
    pub fn load(path: &Path) -> ProtosyncResult<Self> {
        loader::load_preferences(path)
    }

    /// Load from the user config directory, or defaults, then apply env overrides
    pub fn load_or_default() -> Self {
        loader::load_preferences_or_default()
    }

    /// Apply environment variable overrides (PROTOSYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
