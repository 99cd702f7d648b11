//! Diff engine - Change detection and plan generation

mod compare;
mod engine;
mod plan;

pub use compare::{classify_path, compare_snapshots};
pub use engine::{PlanStats, PlannedAction, ReconciliationPlan};
pub use plan::{plan_reconciliation, stale_paths};
