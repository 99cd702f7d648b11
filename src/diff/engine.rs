//! Reconciliation plan types

use crate::types::{FileSnapshot, RelativePath, SyncAction};
use serde::Serialize;
use std::time::SystemTime;

/// One classified path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub path: RelativePath,
    pub action: SyncAction,

    /// Source size for copies and unchanged files, 0 for deletes
    pub size: u64,

    /// Source modification time, absent for deletes
    #[serde(skip)]
    pub mtime: Option<SystemTime>,
}

/// Classification of every path in the union of both listings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReconciliationPlan {
    pub actions: Vec<PlannedAction>,
    pub stats: PlanStats,
}

impl ReconciliationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classification of a source path and update statistics
    pub fn add_classified(&mut self, action: SyncAction, src: &FileSnapshot) {
        match action {
            SyncAction::CopyNew => {
                self.stats.copy_count += 1;
                self.stats.total_bytes += src.size;
            }
            SyncAction::CopyChanged => {
                self.stats.update_count += 1;
                self.stats.total_bytes += src.size;
            }
            SyncAction::Unchanged => self.stats.unchanged_count += 1,
            SyncAction::Delete => self.stats.delete_count += 1,
        }

        self.actions.push(PlannedAction {
            path: src.path.clone(),
            action,
            size: src.size,
            mtime: Some(src.mtime),
        });
    }

    /// Record a stale destination path
    pub fn add_delete(&mut self, path: RelativePath) {
        self.stats.delete_count += 1;
        self.actions.push(PlannedAction {
            path,
            action: SyncAction::Delete,
            size: 0,
            mtime: None,
        });
    }

    /// Record a source path that could not be classified
    pub fn add_skipped(&mut self) {
        self.stats.skipped += 1;
    }

    /// True when applying the plan would not touch the destination
    pub fn is_noop(&self) -> bool {
        self.actions.iter().all(|a| a.action.is_unchanged())
    }

    pub fn action_for(&self, path: &RelativePath) -> Option<SyncAction> {
        self.actions
            .iter()
            .find(|a| &a.path == path)
            .map(|a| a.action)
    }
}

/// Statistics about a plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlanStats {
    /// Bytes to transfer (CopyNew + CopyChanged)
    pub total_bytes: u64,

    pub copy_count: usize,
    pub update_count: usize,
    pub unchanged_count: usize,
    pub delete_count: usize,

    /// Source paths whose stat failed during planning
    pub skipped: usize,
}

impl PlanStats {
    /// Number of files that would be copied
    pub fn transfer_count(&self) -> usize {
        self.copy_count + self.update_count
    }
}
