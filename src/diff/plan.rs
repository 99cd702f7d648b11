//! Reconciliation plan generation

use crate::diff::{classify_path, ReconciliationPlan};
use crate::types::{RelativePath, TreeListing};
use crate::Config;
use tracing::error;

/// Destination paths with no counterpart in the source listing
pub fn stale_paths<'a>(
    src: &'a TreeListing,
    dest: &'a TreeListing,
) -> impl Iterator<Item = &'a RelativePath> + 'a {
    dest.iter().filter(move |path| !src.contains(path))
}

/// Classify every path of both listings without mutating anything
///
/// Source paths go through the same `classify_path` the copy pass uses, so
/// the preview matches what a real run would do at this moment. A source
/// path whose stat fails is logged and counted in `stats.skipped`.
///
/// # Example
/// ```no_run
/// use treesync::diff::plan_reconciliation;
/// use treesync::scanner::list_files;
/// use treesync::Config;
///
/// # async fn preview(config: Config) -> Result<(), treesync::SyncError> {
/// let src = list_files(&config.source).await?;
/// let dest = list_files(&config.destination).await?;
/// let plan = plan_reconciliation(&config, &src, &dest).await;
/// println!("{} file(s) to copy", plan.stats.transfer_count());
/// # Ok(())
/// # }
/// ```
pub async fn plan_reconciliation(
    config: &Config,
    src: &TreeListing,
    dest: &TreeListing,
) -> ReconciliationPlan {
    let mut plan = ReconciliationPlan::new();

    for path in src {
        match classify_path(path, config).await {
            Ok((action, snapshot)) => plan.add_classified(action, &snapshot),
            Err(e) => {
                error!("{}", e);
                plan.add_skipped();
            }
        }
    }

    for path in stale_paths(src, dest) {
        plan.add_delete(path.clone());
    }

    plan
}
