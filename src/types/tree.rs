//! TreeListing - The set of regular files found under a root

use super::RelativePath;
use std::collections::btree_set::{self, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Regular files reachable under a root at enumeration time
#[derive(Debug, Clone, PartialEq)]
pub struct TreeListing {
    /// Relative paths of every regular file
    pub files: BTreeSet<RelativePath>,

    /// Number of directories traversed (root excluded)
    pub total_dirs: usize,

    /// Enumeration metadata
    pub scan_duration: Duration,
    pub root_path: PathBuf,
}

impl TreeListing {
    /// Create a new empty listing
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            files: BTreeSet::new(),
            total_dirs: 0,
            scan_duration: Duration::from_secs(0),
            root_path,
        }
    }

    /// Record a file. Returns false if it was already present.
    pub fn insert(&mut self, path: RelativePath) -> bool {
        self.files.insert(path)
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, RelativePath> {
        self.files.iter()
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Set the scan duration after enumeration completes
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }

    /// Increment the directory counter
    pub fn increment_dirs(&mut self) {
        self.total_dirs += 1;
    }
}

impl<'a> IntoIterator for &'a TreeListing {
    type Item = &'a RelativePath;
    type IntoIter = btree_set::Iter<'a, RelativePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl FromIterator<RelativePath> for TreeListing {
    /// Build a rootless listing, mostly useful in tests
    fn from_iter<I: IntoIterator<Item = RelativePath>>(iter: I) -> Self {
        let mut listing = TreeListing::new(PathBuf::new());
        for path in iter {
            listing.insert(path);
        }
        listing
    }
}
