//! RelativePath - Correlation key between the source and destination trees

use super::SyncError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A file path relative to a sync root
///
/// Built from path components only, so `a/./b` and `a//b` are the same key
/// as `a/b`. Always rendered with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Normalize a relative path
    ///
    /// Rejects absolute paths, `..` components and paths that normalize to
    /// nothing.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(SyncError::InvalidPath(path.to_path_buf()));
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(SyncError::InvalidPath(path.to_path_buf()));
        }

        Ok(Self(normalized))
    }

    /// Express `full` relative to `root`
    pub fn from_root(root: &Path, full: &Path) -> Result<Self, SyncError> {
        let relative = full
            .strip_prefix(root)
            .map_err(|_| SyncError::InvalidPath(full.to_path_buf()))?;
        Self::new(relative)
    }

    /// Join this path onto a root
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in self.0.components() {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", component.as_os_str().to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
