//! Core type definitions for treesync

mod action;
mod entry;
mod error;
mod path;
mod tree;

pub use action::SyncAction;
pub use entry::FileSnapshot;
pub use error::SyncError;
pub use path::RelativePath;
pub use tree::TreeListing;
