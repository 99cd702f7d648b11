//! Directory enumeration

mod walker;

pub use walker::list_files;
