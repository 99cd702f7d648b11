//! Configuration management

use crate::types::SyncError;
use clap::{Parser, ValueEnum};
use std::path::{Component, Path, PathBuf};

/// Mirror a source directory tree into a destination directory tree
#[derive(Debug, Parser)]
#[command(name = "treesync", version, about)]
pub struct Cli {
    /// Source directory (read only)
    pub source: PathBuf,

    /// Destination directory (created if missing)
    pub destination: PathBuf,

    /// Show the plan without touching the destination
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan or run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Progress display
    #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
    pub progress: ProgressMode,

    /// Log per-file decisions
    #[arg(short, long)]
    pub verbose: bool,
}

/// How copy-pass progress is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProgressMode {
    /// Bar on an attended terminal, nothing otherwise
    #[default]
    Auto,
    /// Always draw the progress bar
    Bar,
    /// Plain "Progress: N%" line
    Percent,
    /// No progress output
    Off,
}

/// Immutable run configuration, captured once at startup
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Source root (absolute)
    pub source: PathBuf,

    /// Destination root (absolute)
    pub destination: PathBuf,

    /// Dry run (show plan, don't execute)
    pub dry_run: bool,

    /// Emit machine-readable output
    pub json: bool,

    pub progress: ProgressMode,
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            source: absolutize(&cli.source)?,
            destination: absolutize(&cli.destination)?,
            dry_run: cli.dry_run,
            json: cli.json,
            progress: cli.progress,
        })
    }
}

/// Resolve `path` against the current directory and drop `.`/`..` lexically
///
/// Does not touch the filesystem, so roots that do not exist yet resolve too.
pub fn absolutize(path: &Path) -> Result<PathBuf, SyncError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| {
            SyncError::Config(format!("Cannot resolve {}: {}", path.display(), e))
        })?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}
