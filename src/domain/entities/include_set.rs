//! IncludeSet entity - directories passed to the compiler as `--proto_path`

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Deduplicated include directories in first-occurrence order.
///
/// Every discovered schema's parent directory is a member, so any schema can
/// import any other by file name regardless of where it lives in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    dirs: Vec<PathBuf>,
}

impl IncludeSet {
    /// Create an empty include set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from schema sources, one entry per distinct parent directory.
    pub fn from_sources<P: AsRef<Path>>(sources: &[P]) -> Self {
        let mut set = Self::new();
        let mut seen = HashSet::new();
        for source in sources {
            if let Some(parent) = source.as_ref().parent() {
                if seen.insert(parent.to_path_buf()) {
                    set.dirs.push(parent.to_path_buf());
                }
            }
        }
        set
    }

    /// Add a directory if not already present. Returns true if it was added.
    pub fn insert(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.dirs.contains(&dir) {
            false
        } else {
            self.dirs.push(dir);
            true
        }
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Directory of `source` relative to the first member that contains it.
    ///
    /// The compiler names each input by its path under the first matching
    /// `--proto_path`, and some backends mirror that path below the output
    /// directory. Empty when `source` sits directly in that member or in none.
    pub fn virtual_dir(&self, source: &Path) -> PathBuf {
        let Some(parent) = source.parent() else {
            return PathBuf::new();
        };
        self.dirs
            .iter()
            .find(|dir| source.starts_with(dir))
            .and_then(|dir| parent.strip_prefix(dir).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a IncludeSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_occurrence_order() {
        let sources = [
            PathBuf::from("/root/b/x.proto"),
            PathBuf::from("/root/a/y.proto"),
            PathBuf::from("/root/b/z.proto"),
        ];
        let set = IncludeSet::from_sources(&sources);
        assert_eq!(
            set.as_slice(),
            &[PathBuf::from("/root/b"), PathBuf::from("/root/a")]
        );
    }

    #[test]
    fn empty_sources_empty_set() {
        let sources: [PathBuf; 0] = [];
        assert!(IncludeSet::from_sources(&sources).is_empty());
    }

    #[test]
    fn insert_deduplicates() {
        let mut set = IncludeSet::new();
        assert!(set.insert("/a"));
        assert!(!set.insert("/a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn virtual_dir_uses_first_containing_member() {
        let sources = [
            PathBuf::from("/p/a.proto"),
            PathBuf::from("/p/z/msg.proto"),
        ];
        let set = IncludeSet::from_sources(&sources);
        assert_eq!(set.virtual_dir(Path::new("/p/z/msg.proto")), PathBuf::from("z"));
        assert_eq!(set.virtual_dir(Path::new("/p/a.proto")), PathBuf::new());
    }

    #[test]
    fn virtual_dir_empty_when_own_parent_listed_first() {
        let sources = [
            PathBuf::from("/p/z/msg.proto"),
            PathBuf::from("/p/a.proto"),
        ];
        let set = IncludeSet::from_sources(&sources);
        assert_eq!(set.virtual_dir(Path::new("/p/z/msg.proto")), PathBuf::new());
        assert_eq!(set.virtual_dir(Path::new("/elsewhere/x.proto")), PathBuf::new());
    }

    proptest! {
        #[test]
        fn one_entry_per_distinct_parent(
            picks in proptest::collection::vec((0usize..6, 0usize..4), 0..40)
        ) {
            let sources: Vec<PathBuf> = picks
                .iter()
                .map(|(d, f)| PathBuf::from(format!("/root/d{}/f{}.proto", d, f)))
                .collect();
            let set = IncludeSet::from_sources(&sources);

            let mut expected: Vec<PathBuf> = Vec::new();
            for s in &sources {
                let parent = s.parent().unwrap().to_path_buf();
                if !expected.contains(&parent) {
                    expected.push(parent);
                }
            }
            prop_assert_eq!(set.as_slice(), expected.as_slice());
            for s in &sources {
                prop_assert!(set.contains(s.parent().unwrap()));
            }
        }
    }
}
