//! Executor module - the reconciliation pass

pub mod copy;
pub mod delete;

use crate::diff::{classify_path, stale_paths};
use crate::types::{RelativePath, SyncAction, SyncError, TreeListing};
use crate::ui::ProgressSink;
use crate::Config;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, error};

pub use copy::{copy_file_preserving_times, replace_symlinked_parents};
pub use delete::delete_stale_file;

/// A per-file error that was logged and skipped
#[derive(Debug)]
pub struct Failure {
    pub path: RelativePath,
    pub error: SyncError,
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Failure", 3)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("stage", self.error.stage())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

/// Outcome of one reconciliation pass
#[derive(Debug, Default, Serialize)]
pub struct ReconcileReport {
    /// Source files visited in the copy pass
    pub processed: usize,
    pub copied_new: usize,
    pub copied_changed: usize,
    pub unchanged: usize,
    pub deleted: usize,
    /// Destination paths removed by the delete pass
    pub deleted_paths: Vec<RelativePath>,
    pub bytes_copied: u64,
    pub failures: Vec<Failure>,
}

impl ReconcileReport {
    /// Files actually copied (new + changed)
    pub fn copied(&self) -> usize {
        self.copied_new + self.copied_changed
    }

    /// True when the destination was not touched
    pub fn is_noop(&self) -> bool {
        self.copied() == 0 && self.deleted == 0
    }

    fn record_failure(&mut self, error: SyncError, path: &RelativePath) {
        error!("{}", error);
        self.failures.push(Failure {
            path: path.clone(),
            error,
        });
    }
}

/// Make the destination tree's regular files match the source tree's
///
/// Two passes, strictly in order:
///
/// 1. **Copy/update** over every source path: classify, copy when
///    `CopyNew`/`CopyChanged`, report one unit of progress per path.
/// 2. **Delete** every destination path absent from the source listing.
///
/// Every stat, copy or delete failure is logged, recorded in the report and
/// skipped; no failure stops the pass. Only the destination is written.
pub async fn reconcile(
    config: &Config,
    src: &TreeListing,
    dest: &TreeListing,
    progress: &mut dyn ProgressSink,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    progress.start(src.len() as u64);

    for path in src {
        process_source_path(path, config, &mut report).await;
        report.processed += 1;
        progress.update(report.processed as u64);
    }

    for path in stale_paths(src, dest) {
        match delete_stale_file(&config.destination, path).await {
            Ok(()) => {
                debug!(path = %path, "deleted");
                report.deleted += 1;
                report.deleted_paths.push(path.clone());
            }
            Err(e) => report.record_failure(e, path),
        }
    }

    progress.stop();
    report
}

async fn process_source_path(path: &RelativePath, config: &Config, report: &mut ReconcileReport) {
    let (action, snapshot) = match classify_path(path, config).await {
        Ok(classified) => classified,
        Err(e) => {
            report.record_failure(e, path);
            return;
        }
    };

    if !action.is_copy() {
        report.unchanged += 1;
        return;
    }

    let src_path = path.resolve(&config.source);
    let dest_path = path.resolve(&config.destination);
    let copied = match replace_symlinked_parents(&config.destination, path).await {
        Ok(()) => copy_file_preserving_times(&src_path, &dest_path, &snapshot).await,
        Err(e) => Err(e),
    };
    match copied {
        Ok(bytes) => {
            debug!(path = %path, action = action.action_name(), bytes, "copied");
            report.bytes_copied += bytes;
            if action == SyncAction::CopyNew {
                report.copied_new += 1;
            } else {
                report.copied_changed += 1;
            }
        }
        Err(source) => report.record_failure(
            SyncError::Copy {
                path: path.clone(),
                source,
            },
            path,
        ),
    }
}
