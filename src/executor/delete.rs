//! Stale file removal

use crate::types::{RelativePath, SyncError};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Remove a destination file that no longer exists in the source
///
/// A file that is already gone counts as removed. Directories left empty
/// are kept.
pub async fn delete_stale_file(dest_root: &Path, path: &RelativePath) -> Result<(), SyncError> {
    match fs::remove_file(path.resolve(dest_root)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SyncError::Delete {
            path: path.clone(),
            source,
        }),
    }
}
