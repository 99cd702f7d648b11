//! Error types for treesync

use super::RelativePath;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Error types for treesync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A directory could not be listed; the listing would be partial
    #[error("Failed to read directory {}: {source}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path cannot be expressed relative to a sync root
    #[error("Invalid relative path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Source file could not be stat'ed
    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: RelativePath,
        #[source]
        source: io::Error,
    },

    /// Copy, parent creation or timestamp update failed
    #[error("Failed to copy {path}: {source}")]
    Copy {
        path: RelativePath,
        #[source]
        source: io::Error,
    },

    /// Stale destination file could not be removed
    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: RelativePath,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Check if this error aborts the whole run
    ///
    /// Per-file errors (stat, copy, delete) are isolated to their path.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SyncError::Stat { .. } | SyncError::Copy { .. } | SyncError::Delete { .. }
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        self.io_kind() == Some(ErrorKind::PermissionDenied)
    }

    /// Check if this error is related to disk space
    pub fn is_disk_space_error(&self) -> bool {
        match self.io_source() {
            Some(err) => {
                err.kind() == ErrorKind::StorageFull || matches!(err.raw_os_error(), Some(28 | 122))
            }
            None => false,
        }
    }

    /// Stage label used when grouping per-file failures
    pub fn stage(&self) -> &'static str {
        match self {
            SyncError::Io(_) => "I/O error",
            SyncError::Config(_) => "Configuration error",
            SyncError::Enumeration { .. } => "Enumeration error",
            SyncError::InvalidPath(_) => "Invalid path",
            SyncError::Stat { .. } => "Stat failed",
            SyncError::Copy { .. } => "Copy failed",
            SyncError::Delete { .. } => "Delete failed",
        }
    }

    fn io_source(&self) -> Option<&io::Error> {
        match self {
            SyncError::Io(source)
            | SyncError::Enumeration { source, .. }
            | SyncError::Stat { source, .. }
            | SyncError::Copy { source, .. }
            | SyncError::Delete { source, .. } => Some(source),
            SyncError::Config(_) | SyncError::InvalidPath(_) => None,
        }
    }

    fn io_kind(&self) -> Option<ErrorKind> {
        self.io_source().map(io::Error::kind)
    }
}
