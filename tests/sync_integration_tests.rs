//! End-to-end reconciliation tests.
//!
//! These cases cover the convergence guarantees of a sync run: new-file
//! propagation, size and timestamp change detection, stale deletion,
//! idempotence, a missing source root, and per-file fault isolation.

use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;
use treesync::commands::sync::{run, RunOutcome};
use treesync::config::ProgressMode;
use treesync::executor::{reconcile, ReconcileReport};
use treesync::scanner::list_files;
use treesync::ui::NoProgress;
use treesync::{Config, SyncError};

fn config_for(source: &Path, destination: &Path) -> Config {
    Config {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        progress: ProgressMode::Off,
        ..Config::default()
    }
}

fn write_file(root: &Path, rel: &str, content: &[u8], mtime_secs: i64) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, content).expect("write file");
    filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).expect("set mtime");
}

fn mtime_of(path: &Path) -> std::time::SystemTime {
    fs::metadata(path)
        .expect("read metadata")
        .modified()
        .expect("read mtime")
}

async fn sync(config: &Config) -> ReconcileReport {
    match run(config).await.expect("sync run should succeed") {
        RunOutcome::Synced(report) => report,
        RunOutcome::Planned(_) => panic!("expected a real run"),
    }
}

#[tokio::test]
async fn test_example_plan_copy_new_unchanged_and_delete() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "a.txt", &[b'a'; 10], 100);
    write_file(src.path(), "b.txt", &[b'b'; 20], 200);
    write_file(dst.path(), "a.txt", &[b'a'; 10], 100);
    write_file(dst.path(), "c.txt", &[b'c'; 5], 50);

    let report = sync(&config_for(src.path(), dst.path())).await;

    assert_eq!(report.unchanged, 1, "a.txt is unchanged");
    assert_eq!(report.copied_new, 1, "b.txt is new");
    assert_eq!(report.copied_changed, 0);
    assert_eq!(report.deleted, 1, "c.txt is stale");
    assert!(report.failures.is_empty());

    assert_eq!(fs::read(dst.path().join("b.txt")).expect("read b"), vec![b'b'; 20]);
    assert_eq!(mtime_of(&dst.path().join("b.txt")), UNIX_EPOCH + Duration::from_secs(200));
    assert!(!dst.path().join("c.txt").exists());
}

#[tokio::test]
async fn test_convergence_into_missing_destination() {
    let src = TempDir::new().expect("create src tempdir");
    let dst_parent = TempDir::new().expect("create dst tempdir");
    let dst = dst_parent.path().join("not/yet/created");

    write_file(src.path(), "root.txt", b"root-content", 1_000);
    write_file(src.path(), "nested/deep/inner.txt", b"inner-content", 2_000);

    let report = sync(&config_for(src.path(), &dst)).await;
    assert_eq!(report.copied_new, 2);

    for rel in ["root.txt", "nested/deep/inner.txt"] {
        let src_meta = fs::metadata(src.path().join(rel)).expect("src metadata");
        let dst_meta = fs::metadata(dst.join(rel)).expect("dst metadata");
        assert_eq!(src_meta.len(), dst_meta.len());
        assert_eq!(src_meta.modified().ok(), dst_meta.modified().ok());
    }
}

#[tokio::test]
async fn test_second_run_is_noop() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "one.txt", b"1", 10);
    write_file(src.path(), "dir/two.txt", b"22", 20);
    fs::write(src.path().join("now.txt"), b"fresh mtime with nanoseconds").expect("write");
    write_file(dst.path(), "stale.txt", b"x", 5);

    let config = config_for(src.path(), dst.path());
    let first = sync(&config).await;
    assert_eq!(first.copied_new, 3);
    assert_eq!(first.deleted, 1);

    let second = sync(&config).await;
    assert!(second.is_noop(), "second run must not copy or delete: {second:?}");
    assert_eq!(second.unchanged, 3);
}

#[tokio::test]
async fn test_size_change_with_same_mtime_is_recopied() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "same-time.txt", b"new-data", 500);
    write_file(dst.path(), "same-time.txt", b"old", 500);

    let report = sync(&config_for(src.path(), dst.path())).await;

    assert_eq!(report.copied_changed, 1);
    assert_eq!(fs::read(dst.path().join("same-time.txt")).expect("read"), b"new-data");
}

#[tokio::test]
async fn test_mtime_change_with_same_size_is_recopied() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "same-size.txt", b"AAAA", 900);
    // Destination newer than source still counts as changed
    write_file(dst.path(), "same-size.txt", b"BBBB", 1_900);

    let report = sync(&config_for(src.path(), dst.path())).await;

    assert_eq!(report.copied_changed, 1);
    assert_eq!(fs::read(dst.path().join("same-size.txt")).expect("read"), b"AAAA");
    assert_eq!(
        mtime_of(&dst.path().join("same-size.txt")),
        UNIX_EPOCH + Duration::from_secs(900)
    );
}

#[tokio::test]
async fn test_missing_source_root_deletes_everything() {
    let src_parent = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    let missing_src = src_parent.path().join("gone");

    write_file(dst.path(), "a.txt", b"a", 1);
    write_file(dst.path(), "sub/b.txt", b"b", 2);

    let report = sync(&config_for(&missing_src, dst.path())).await;

    assert_eq!(report.processed, 0);
    assert_eq!(report.copied(), 0);
    assert_eq!(report.deleted, 2);
    assert!(!dst.path().join("a.txt").exists());
    assert!(!dst.path().join("sub/b.txt").exists());
    assert!(!missing_src.exists(), "source is never created");
}

#[tokio::test]
async fn test_failing_copy_does_not_affect_other_paths() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "good.txt", b"good", 10);
    write_file(src.path(), "blocked", b"file in source", 10);
    // A directory occupies the destination path of "blocked"
    write_file(dst.path(), "blocked/inner.txt", b"dir in destination", 10);
    write_file(dst.path(), "stale.txt", b"stale", 10);

    let report = sync(&config_for(src.path(), dst.path())).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.copied_new, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, SyncError::Copy { .. }));
    assert_eq!(report.failures[0].path.to_string(), "blocked");
    assert_eq!(report.deleted, 2, "stale.txt and blocked/inner.txt are still deleted");
    assert!(dst.path().join("good.txt").exists());
    assert!(!dst.path().join("stale.txt").exists());
}

#[tokio::test]
async fn test_source_file_vanishing_mid_run_is_skipped() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "keep.txt", b"keep", 10);
    write_file(src.path(), "vanish.txt", b"vanish", 10);

    let config = config_for(src.path(), dst.path());
    let src_listing = list_files(src.path()).await.expect("list src");
    let dst_listing = list_files(dst.path()).await.expect("list dst");

    // Removed after enumeration, before reconciliation
    fs::remove_file(src.path().join("vanish.txt")).expect("remove source file");

    let report = reconcile(&config, &src_listing, &dst_listing, &mut NoProgress).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.copied_new, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, SyncError::Stat { .. }));
    assert!(dst.path().join("keep.txt").exists());
    assert!(!dst.path().join("vanish.txt").exists());
}

#[tokio::test]
async fn test_dry_run_makes_no_changes() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "new.txt", b"should-not-copy", 10);
    write_file(dst.path(), "old.txt", b"should-not-delete", 10);

    let mut config = config_for(src.path(), dst.path());
    config.dry_run = true;

    let outcome = run(&config).await.expect("dry-run should succeed");
    let RunOutcome::Planned(plan) = outcome else {
        panic!("dry run must only plan");
    };

    assert_eq!(plan.stats.copy_count, 1);
    assert_eq!(plan.stats.delete_count, 1);
    assert!(!dst.path().join("new.txt").exists(), "dry-run must not copy");
    assert!(dst.path().join("old.txt").exists(), "dry-run must not delete");
}

#[tokio::test]
async fn test_unreadable_destination_tree_aborts_before_writing() {
    let src = TempDir::new().expect("create src tempdir");
    let dst_parent = TempDir::new().expect("create dst tempdir");

    write_file(src.path(), "a.txt", b"a", 10);
    // Destination root is a plain file, so it cannot be enumerated
    let dst = dst_parent.path().join("not-a-dir");
    fs::write(&dst, b"plain").expect("write plain file");

    let err = run(&config_for(src.path(), &dst))
        .await
        .expect_err("enumeration failure is fatal");

    assert!(matches!(err, SyncError::Enumeration { .. }));
    assert!(err.is_fatal());
    assert_eq!(fs::read(&dst).expect("read"), b"plain");
}
