//! SyncAction - Per-path classification decided by the diff rules

use serde::Serialize;

/// What a reconciliation pass does with one relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncAction {
    /// Copy new file (exists in src, missing in dest)
    CopyNew,

    /// Overwrite existing file (size or mtime differ)
    CopyChanged,

    /// Files match, nothing to do
    Unchanged,

    /// Delete file (exists in dest, missing in src)
    Delete,
}

impl SyncAction {
    pub fn is_copy(&self) -> bool {
        matches!(self, SyncAction::CopyNew | SyncAction::CopyChanged)
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, SyncAction::Unchanged)
    }

    /// Short name used in listings and logs
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::CopyNew => "Copy",
            SyncAction::CopyChanged => "Update",
            SyncAction::Unchanged => "Skip",
            SyncAction::Delete => "Delete",
        }
    }
}
