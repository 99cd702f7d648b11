//! # treesync - One-way directory mirroring
//!
//! Makes a destination tree's regular files match a source tree's: copies
//! new and changed files (size or modification time differ), creates missing
//! directories, and removes files that vanished from the source.
//!
//! Per-file failures are logged and skipped; only enumeration failures abort
//! a run. Re-running after an interruption converges.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use types::{FileSnapshot, RelativePath, SyncAction, SyncError, TreeListing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
