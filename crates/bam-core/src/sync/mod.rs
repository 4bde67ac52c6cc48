//! Sync tool seam
//!
//! [`SyncTool`] runs one source→destination invocation to completion and
//! returns its captured stdout as lines. [`Rsync`] is the production
//! implementation; tests substitute scripted tools.

pub mod rsync;

use std::fmt;

use serde::Serialize;

use crate::Result;

pub use rsync::Rsync;

/// Whether an invocation may change the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunMode {
    /// rsync `--dry-run`: report what would change.
    DryRun,
    /// Apply changes, including deletions.
    Live,
}

impl RunMode {
    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }

    /// Suffix used in change-log file names.
    pub fn label(self) -> &'static str {
        match self {
            RunMode::DryRun => "DRYRUN",
            RunMode::Live => "LIVE",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "dry run"),
            RunMode::Live => write!(f, "live run"),
        }
    }
}

/// Everything needed to mirror one source into one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Configured source name.
    pub source: String,
    /// Expanded source paths, in order.
    pub paths: Vec<String>,
    /// Full destination path.
    pub destination: String,
    /// Exclude patterns, in order.
    pub excludes: Vec<String>,
    pub mode: RunMode,
}

/// Runs a file-synchronization tool.
pub trait SyncTool {
    /// Run `invocation` to completion and return stdout split into lines.
    fn run(&self, invocation: &Invocation) -> Result<Vec<String>>;
}

impl<T: SyncTool + ?Sized> SyncTool for &T {
    fn run(&self, invocation: &Invocation) -> Result<Vec<String>> {
        (**self).run(invocation)
    }
}
