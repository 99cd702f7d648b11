//! File comparison logic

use crate::types::{FileSnapshot, RelativePath, SyncAction, SyncError};
use crate::Config;
use std::io::ErrorKind;
use tracing::trace;

/// Compare a source snapshot against its destination counterpart
///
/// Metadata only, no content hashing:
///
/// 1. **Missing destination** → `CopyNew`
/// 2. **Destination is not a regular file** → `CopyChanged`
/// 3. **Size mismatch** → `CopyChanged`
/// 4. **Modification time mismatch** (either direction, exact to the
///    nanosecond) → `CopyChanged`
/// 5. Otherwise → `Unchanged`
///
/// The copy sets the destination mtime to the source mtime exactly, so a
/// second pass over an unmodified source classifies everything `Unchanged`.
pub fn compare_snapshots(src: &FileSnapshot, dest: Option<&FileSnapshot>) -> SyncAction {
    let Some(dest) = dest else {
        return SyncAction::CopyNew;
    };

    if !dest.is_file || src.size != dest.size || src.mtime != dest.mtime {
        return SyncAction::CopyChanged;
    }

    SyncAction::Unchanged
}

/// Snapshot both sides of `path` and classify it
///
/// # Errors
/// * `SyncError::Stat` - the source file is missing, unreadable, or no
///   longer a regular file. The caller skips the path.
///
/// A destination stat failure other than `NotFound` classifies the path
/// `CopyChanged`; the copy attempt then reports the real cause.
pub async fn classify_path(
    path: &RelativePath,
    config: &Config,
) -> Result<(SyncAction, FileSnapshot), SyncError> {
    let src = FileSnapshot::capture(&config.source, path)
        .await
        .map_err(|source| SyncError::Stat {
            path: path.clone(),
            source,
        })?;

    if !src.is_file {
        return Err(SyncError::Stat {
            path: path.clone(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "no longer a regular file"),
        });
    }

    let action = match FileSnapshot::capture(&config.destination, path).await {
        Ok(dest) => compare_snapshots(&src, Some(&dest)),
        Err(e) if e.kind() == ErrorKind::NotFound => SyncAction::CopyNew,
        Err(e) => {
            trace!(path = %path, error = %e, "destination stat failed, forcing copy");
            SyncAction::CopyChanged
        }
    };

    Ok((action, src))
}
