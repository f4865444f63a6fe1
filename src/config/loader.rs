//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProtosyncError, ProtosyncResult};

use super::types::{CompilationConfig, Preferences};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load a compilation config and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ProtosyncResult<(CompilationConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ProtosyncResult<(CompilationConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: CompilationConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ProtosyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load preferences from a TOML file
pub fn load_preferences(path: &Path) -> ProtosyncResult<Preferences> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ProtosyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load preferences from the user config dir, or defaults, with env overrides
pub fn load_preferences_or_default() -> Preferences {
    if let Some(path) = preferences_path() {
        if path.exists() {
            match load_preferences(&path) {
                Ok(prefs) => return with_env_overrides(prefs),
                Err(e) => tracing::warn!("ignoring preferences: {}", e),
            }
        }
    }
    with_env_overrides(Preferences::default())
}

/// Location of the user preferences file.
///
/// `PROTOSYNC_PREFERENCES` overrides the default
/// `$XDG_CONFIG_HOME/protosync/preferences.toml`.
pub fn preferences_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PROTOSYNC_PREFERENCES") {
        return Some(PathBuf::from(path));
    }
    user_config_dir().map(|d| d.join("protosync/preferences.toml"))
}

/// Apply environment variable overrides (PROTOSYNC_* prefix)
pub fn with_env_overrides(mut prefs: Preferences) -> Preferences {
    if let Some(v) = env_flag("PROTOSYNC_ENABLED") {
        prefs.enabled = v;
    }
    if let Some(v) = env_flag("PROTOSYNC_LOG_ERRORS") {
        prefs.log_errors = v;
    }
    if let Some(v) = env_flag("PROTOSYNC_LOG_DEBUG") {
        prefs.log_debug = v;
    }
    if let Ok(protoc) = std::env::var("PROTOSYNC_PROTOC") {
        if !protoc.trim().is_empty() {
            prefs.protoc = Some(PathBuf::from(protoc));
        }
    }
    prefs
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|val| val.to_lowercase() != "false" && val != "0")
}

/// Get XDG config directory
fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "enabled",
        "output",
        "localize_imports",
        "csharp",
        "go",
        "python",
        "cpp",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
