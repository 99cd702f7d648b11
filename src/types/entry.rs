//! FileSnapshot - Size and timestamps of one file at stat time

use super::RelativePath;
use serde::Serialize;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Metadata of a single file, captured by one `symlink_metadata` call
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Relative path from sync root
    pub path: RelativePath,

    /// File size in bytes
    pub size: u64,

    /// Last modification time, full precision
    pub mtime: SystemTime,

    /// Last access time, full precision
    pub atime: SystemTime,

    /// False for directories, symlinks and special files
    pub is_file: bool,
}

impl FileSnapshot {
    /// Create a snapshot of a regular file
    pub fn new(path: RelativePath, size: u64, mtime: SystemTime, atime: SystemTime) -> Self {
        Self {
            path,
            size,
            mtime,
            atime,
            is_file: true,
        }
    }

    /// Build a snapshot from already-read metadata
    pub fn from_metadata(path: RelativePath, metadata: &Metadata) -> io::Result<Self> {
        let mtime = metadata.modified()?;
        // Some platforms do not track access time; fall back to mtime.
        let atime = metadata.accessed().unwrap_or(mtime);

        Ok(Self {
            path,
            size: metadata.len(),
            mtime,
            atime,
            is_file: metadata.file_type().is_file(),
        })
    }

    /// Stat `path` under `root` without following a trailing symlink
    pub async fn capture(root: &Path, path: &RelativePath) -> io::Result<Self> {
        let metadata = tokio::fs::symlink_metadata(path.resolve(root)).await?;
        Self::from_metadata(path.clone(), &metadata)
    }
}
