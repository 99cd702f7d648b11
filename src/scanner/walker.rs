//! Sequential async directory walker

use crate::types::{RelativePath, SyncError, TreeListing};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, trace};

/// Enumerate every regular file under `root_path`
///
/// Walks depth-first with an explicit stack of pending directories. Entry
/// types are read without following links, so symlinks, sockets, FIFOs and
/// devices are skipped silently.
///
/// # Returns
/// * `Ok(TreeListing)` - Every regular file, relative to `root_path`.
///   An absent root yields an empty listing.
/// * `Err(SyncError::Enumeration)` - Any directory (other than an absent
///   root) could not be read. A partial listing is never returned.
pub async fn list_files(root_path: &Path) -> Result<TreeListing, SyncError> {
    let start_time = Instant::now();
    let mut listing = TreeListing::new(root_path.to_path_buf());
    let mut pending: Vec<PathBuf> = vec![root_path.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound && dir == root_path => {
                debug!(root = %root_path.display(), "root does not exist, treating as empty");
                return Ok(listing);
            }
            Err(e) => return Err(enumeration_error(&dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| enumeration_error(&dir, e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| enumeration_error(&path, e))?;

            if file_type.is_dir() {
                listing.increment_dirs();
                pending.push(path);
            } else if file_type.is_file() {
                listing.insert(RelativePath::from_root(root_path, &path)?);
            } else {
                trace!(path = %path.display(), "skipping non-regular entry");
            }
        }
    }

    listing.set_scan_duration(start_time.elapsed());
    debug!(
        root = %root_path.display(),
        files = listing.len(),
        dirs = listing.total_dirs,
        elapsed = ?listing.scan_duration,
        "enumeration complete"
    );

    Ok(listing)
}

fn enumeration_error(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::Enumeration {
        path: path.to_path_buf(),
        source,
    }
}
