//! Change log files
//!
//! Every run writes its [`Report`] to `log.bam_<yymmdd>_<HHMMSS>_<MODE>`.
//! Dry-run logs go to the system temp directory, live logs to the
//! working directory, unless a directory is configured for both.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use fs2::FileExt;

use crate::report::Report;
use crate::sync::RunMode;
use crate::{Error, Result};

/// File name of a change log written at `at`.
pub fn file_name(mode: RunMode, at: DateTime<Local>) -> String {
    format!("log.bam_{}_{}", at.format("%y%m%d_%H%M%S"), mode.label())
}

/// Writes change logs for dry and live runs.
#[derive(Debug, Clone)]
pub struct ChangeLogWriter {
    dry_run_dir: PathBuf,
    live_dir: PathBuf,
}

impl ChangeLogWriter {
    /// Dry-run logs in the temp directory, live logs in `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            dry_run_dir: std::env::temp_dir(),
            live_dir: working_dir.into(),
        }
    }

    /// Write every log into `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            dry_run_dir: dir.clone(),
            live_dir: dir,
        }
    }

    pub fn dir_for(&self, mode: RunMode) -> &Path {
        match mode {
            RunMode::DryRun => &self.dry_run_dir,
            RunMode::Live => &self.live_dir,
        }
    }

    /// Render `report` and write it, returning the log path.
    pub fn write(&self, report: &Report, mode: RunMode) -> Result<PathBuf> {
        let path = self.dir_for(mode).join(file_name(mode, Local::now()));
        write_atomic(&path, report.render().as_bytes())?;
        tracing::info!(?path, %mode, "Wrote change log");
        Ok(path)
    }
}

/// Write content to `path` through a uniquely named temp file in the same
/// directory, locked while it is filled, then renamed into place.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".log.bam")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;
    let lock_failed = |_| Error::LockFailed {
        path: path.to_path_buf(),
    };

    temp.as_file().lock_exclusive().map_err(lock_failed)?;
    temp.write_all(content).map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file().unlock().map_err(lock_failed)?;

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
