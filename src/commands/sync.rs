//! Main sync command

use crate::diff::{plan_reconciliation, ReconciliationPlan};
use crate::executor::{reconcile, Failure, ReconcileReport};
use crate::scanner::list_files;
use crate::types::{SyncAction, SyncError};
use crate::ui::progress_for;
use crate::Config;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// What a finished run did
#[derive(Debug)]
pub enum RunOutcome {
    /// Destination reconciled
    Synced(ReconcileReport),
    /// Dry run: plan computed, nothing touched
    Planned(ReconciliationPlan),
}

/// Run the sync operation
///
/// Enumeration failures abort before anything is written. Per-file failures
/// during reconciliation are logged and summarized; the run still completes.
pub async fn run(config: &Config) -> Result<RunOutcome, SyncError> {
    let src_listing = list_files(&config.source).await?;
    let dest_listing = list_files(&config.destination).await?;
    info!(
        "Source: {} file(s), destination: {} file(s)",
        src_listing.len(),
        dest_listing.len()
    );

    if config.dry_run {
        let plan = plan_reconciliation(config, &src_listing, &dest_listing).await;
        if config.json {
            print_json(&plan)?;
        } else {
            println!("{}", format_plan_preview(&plan));
            println!("{}", format_dry_run_actions(&plan));
            println!("Dry-run mode: no changes were made.");
        }
        return Ok(RunOutcome::Planned(plan));
    }

    let mut progress = progress_for(config.progress);
    let report = reconcile(config, &src_listing, &dest_listing, progress.as_mut()).await;

    if !report.failures.is_empty() {
        warn!("{}", format_error_summary(&report.failures));
    }
    if config.json {
        print_json(&report)?;
        info!("Sync complete.");
    } else {
        for path in &report.deleted_paths {
            println!("Deleted: {}", path);
        }
        println!("{}", format_report(&report));
        println!("Sync complete.");
    }

    Ok(RunOutcome::Synced(report))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SyncError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn format_report(report: &ReconcileReport) -> String {
    format!(
        "Copied: {}  Updated: {}  Unchanged: {}  Deleted: {}  Failed: {}",
        report.copied_new,
        report.copied_changed,
        report.unchanged,
        report.deleted,
        report.failures.len()
    )
}

fn format_plan_preview(plan: &ReconciliationPlan) -> String {
    format!(
        "Plan:\n  Copy: {}  Update: {}  Delete: {}  Unchanged: {}  Unreadable: {}\n  Total bytes to transfer: {}",
        plan.stats.copy_count,
        plan.stats.update_count,
        plan.stats.delete_count,
        plan.stats.unchanged_count,
        plan.stats.skipped,
        plan.stats.total_bytes
    )
}

fn format_dry_run_actions(plan: &ReconciliationPlan) -> String {
    if plan.actions.is_empty() {
        return "Dry-run actions:\n  (no planned actions)".to_string();
    }

    let mut lines = Vec::with_capacity(plan.actions.len() + 1);
    lines.push("Dry-run actions:".to_string());
    let mut unchanged = 0usize;
    for planned in &plan.actions {
        match planned.action {
            SyncAction::Unchanged => unchanged += 1,
            SyncAction::Delete => {
                lines.push(format!("  DELETE    {}", planned.path));
            }
            SyncAction::CopyNew | SyncAction::CopyChanged => {
                let label = if planned.action == SyncAction::CopyNew {
                    "COPY"
                } else {
                    "UPDATE"
                };
                let mut line = format!("  {:<9} {}  ({} bytes", label, planned.path, planned.size);
                if let Some(mtime) = planned.mtime {
                    let local: DateTime<Local> = mtime.into();
                    line.push_str(&format!(", modified {}", local.format("%Y-%m-%d %H:%M:%S%.3f")));
                }
                line.push(')');
                lines.push(line);
            }
        }
    }

    if unchanged > 0 {
        lines.push(format!("  ({unchanged} unchanged file(s) omitted)"));
    }

    lines.join("\n")
}

fn format_error_summary(failures: &[Failure]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&Failure>> = BTreeMap::new();
    for failure in failures {
        groups.entry(failure.error.stage()).or_default().push(failure);
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "Sync finished with {} per-file error(s):",
        failures.len()
    ));
    for (stage, items) in groups {
        lines.push(format!("  {} ({}):", stage, items.len()));
        for failure in items.iter().take(3) {
            lines.push(format!("    - {}", failure.path));
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }

    if failures.iter().any(|f| f.error.is_permission_error()) {
        lines.push("  Hint: check read/write permissions on the listed paths".to_string());
    }
    if failures.iter().any(|f| f.error.is_disk_space_error()) {
        lines.push("  Hint: the destination may be out of free space".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileSnapshot, RelativePath};
    use std::io::{Error, ErrorKind};
    use std::time::{Duration, UNIX_EPOCH};

    fn rel(path: &str) -> RelativePath {
        RelativePath::new(path).expect("valid relative path")
    }

    fn snapshot(name: &str, size: u64) -> FileSnapshot {
        let mtime = UNIX_EPOCH + Duration::from_secs(1_000);
        FileSnapshot::new(rel(name), size, mtime, mtime)
    }

    #[test]
    fn test_format_plan_preview_contains_action_counts() {
        let mut plan = ReconciliationPlan::new();
        plan.add_classified(SyncAction::CopyNew, &snapshot("copy.txt", 1024));
        plan.add_classified(SyncAction::CopyChanged, &snapshot("update.txt", 2048));
        plan.add_classified(SyncAction::Unchanged, &snapshot("same.txt", 1));
        plan.add_delete(rel("delete.txt"));

        let preview = format_plan_preview(&plan);
        assert!(preview.contains("Copy: 1"));
        assert!(preview.contains("Update: 1"));
        assert!(preview.contains("Delete: 1"));
        assert!(preview.contains("Unchanged: 1"));
        assert!(preview.contains("Total bytes to transfer: 3072"));
    }

    #[test]
    fn test_format_dry_run_actions_lists_planned_actions() {
        let mut plan = ReconciliationPlan::new();
        plan.add_classified(SyncAction::CopyNew, &snapshot("copy.txt", 1));
        plan.add_classified(SyncAction::CopyChanged, &snapshot("update.txt", 2));
        plan.add_classified(SyncAction::Unchanged, &snapshot("same.txt", 3));
        plan.add_delete(rel("delete.txt"));

        let listing = format_dry_run_actions(&plan);
        assert!(listing.contains("Dry-run actions:"));
        assert!(listing.contains("COPY      copy.txt"));
        assert!(listing.contains("UPDATE    update.txt"));
        assert!(listing.contains("DELETE    delete.txt"));
        assert!(listing.contains("(1 unchanged file(s) omitted)"));
        assert!(!listing.contains("same.txt"));
    }

    #[test]
    fn test_format_dry_run_actions_handles_empty_plan() {
        let plan = ReconciliationPlan::new();
        assert!(format_dry_run_actions(&plan).contains("(no planned actions)"));
    }

    #[test]
    fn test_format_error_summary_groups_by_stage() {
        let failures = vec![
            Failure {
                path: rel("a.txt"),
                error: SyncError::Copy {
                    path: rel("a.txt"),
                    source: Error::new(ErrorKind::PermissionDenied, "denied"),
                },
            },
            Failure {
                path: rel("b.txt"),
                error: SyncError::Stat {
                    path: rel("b.txt"),
                    source: Error::new(ErrorKind::NotFound, "gone"),
                },
            },
            Failure {
                path: rel("c.txt"),
                error: SyncError::Copy {
                    path: rel("c.txt"),
                    source: Error::new(ErrorKind::PermissionDenied, "denied"),
                },
            },
        ];

        let summary = format_error_summary(&failures);
        assert!(summary.contains("3 per-file error(s)"));
        assert!(summary.contains("Copy failed (2):"));
        assert!(summary.contains("Stat failed (1):"));
        assert!(summary.contains("- a.txt"));
        assert!(summary.contains("check read/write permissions"));
        assert!(!summary.contains("free space"));
    }

    #[test]
    fn test_format_error_summary_hints_disk_space() {
        let failures = vec![Failure {
            path: rel("big.bin"),
            error: SyncError::Copy {
                path: rel("big.bin"),
                source: Error::from_raw_os_error(28),
            },
        }];

        let summary = format_error_summary(&failures);
        assert!(summary.contains("Copy failed (1):"));
        assert!(summary.contains("out of free space"));
        assert!(!summary.contains("permissions"));
    }

    #[test]
    fn test_format_report_counts() {
        let report = ReconcileReport {
            processed: 4,
            copied_new: 1,
            copied_changed: 2,
            unchanged: 1,
            deleted: 3,
            ..Default::default()
        };

        let line = format_report(&report);
        assert!(line.contains("Copied: 1"));
        assert!(line.contains("Updated: 2"));
        assert!(line.contains("Deleted: 3"));
        assert!(line.contains("Failed: 0"));
    }
}
