//! File copy with timestamp preservation

use crate::types::{FileSnapshot, RelativePath};
use filetime::FileTime;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Copy `src` to `dest`, then stamp `dest` with the snapshot's times
///
/// 1. Create missing parent directories (no-op if they exist)
/// 2. Remove a symlink sitting at `dest` so the copy cannot write through it
/// 3. Copy the bytes, truncating any existing regular file
/// 4. Set access and modification time to exactly `snapshot.atime` / `snapshot.mtime`
///
/// A directory at `dest` is left alone and the copy fails.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(io::Error)` - First failing step
///
/// # Example
/// ```no_run
/// use treesync::executor::copy_file_preserving_times;
/// use treesync::types::{FileSnapshot, RelativePath};
/// use std::path::Path;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let path = RelativePath::new("notes.txt")?;
/// let snapshot = FileSnapshot::capture(Path::new("/src"), &path).await?;
/// copy_file_preserving_times(
///     Path::new("/src/notes.txt"),
///     Path::new("/dst/notes.txt"),
///     &snapshot,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn copy_file_preserving_times(
    src: &Path,
    dest: &Path,
    snapshot: &FileSnapshot,
) -> io::Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }

    if let Ok(existing) = fs::symlink_metadata(dest).await {
        if existing.file_type().is_symlink() {
            fs::remove_file(dest).await?;
        }
    }

    let bytes = fs::copy(src, dest).await?;

    set_times(
        dest.to_path_buf(),
        FileTime::from_system_time(snapshot.atime),
        FileTime::from_system_time(snapshot.mtime),
    )
    .await?;

    Ok(bytes)
}

/// Replace symlinks standing in for parent directories of `path` under `dest_root`
///
/// Stops at the first missing component; `create_dir_all` builds the rest
/// as real directories. Run before [`copy_file_preserving_times`] so the copy
/// stays inside `dest_root`.
pub async fn replace_symlinked_parents(dest_root: &Path, path: &RelativePath) -> io::Result<()> {
    let Some(parent) = path.as_path().parent() else {
        return Ok(());
    };

    let mut current = dest_root.to_path_buf();
    for component in parent.components() {
        current.push(component);
        match fs::symlink_metadata(&current).await {
            Ok(meta) if meta.file_type().is_symlink() => fs::remove_file(&current).await?,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn set_times(path: PathBuf, atime: FileTime, mtime: FileTime) -> io::Result<()> {
    tokio::task::spawn_blocking(move || filetime::set_file_times(&path, atime, mtime))
        .await
        .map_err(io::Error::other)?
}
