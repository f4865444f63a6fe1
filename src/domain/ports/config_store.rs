//! Config store port - read-only access to compilation configs.

use std::path::Path;

use crate::config::LocatedConfig;
use crate::error::ProtosyncResult;

/// Source of compilation configs.
///
/// The core only ever reads configs; authoring them is up to the user.
/// A missing config is `Ok(None)` / an empty list, never an error.
pub trait ConfigStore: Send + Sync {
    /// The single project-wide config, if one exists.
    fn find_project_wide(&self) -> ProtosyncResult<Option<LocatedConfig>>;

    /// Every scoped config stored directly in `dir` (not in subdirectories).
    fn find_scoped(&self, dir: &Path) -> ProtosyncResult<Vec<LocatedConfig>>;
}
