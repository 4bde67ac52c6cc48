//! Resolved global options shared by every command

use std::path::PathBuf;

use bam_core::{ChangeLogWriter, Mirror, MirrorConfig, Rsync, config};

use crate::cli::Cli;
use crate::error::Result;

/// Global options resolved against the working directory.
#[derive(Debug, Clone)]
pub struct Context {
    cwd: PathBuf,
    config: Option<PathBuf>,
    rsync: PathBuf,
    log_dir: Option<PathBuf>,
}

impl Context {
    pub fn new(
        cwd: impl Into<PathBuf>,
        config: Option<PathBuf>,
        rsync: impl Into<PathBuf>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            config,
            rsync: rsync.into(),
            log_dir,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self::new(
            std::env::current_dir()?,
            cli.config.clone(),
            cli.rsync.clone(),
            cli.log_dir.clone(),
        ))
    }

    /// The configuration file this context reads.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => self.cwd.join(path),
            None => config::locate(&self.cwd),
        }
    }

    pub fn load_config(&self) -> Result<MirrorConfig> {
        Ok(MirrorConfig::load(&self.config_path())?)
    }

    pub fn mirror(&self) -> Result<Mirror<Rsync>> {
        Ok(Mirror::new(self.load_config()?, Rsync::new(&self.rsync)))
    }

    pub fn log_writer(&self) -> ChangeLogWriter {
        match &self.log_dir {
            Some(dir) => ChangeLogWriter::in_dir(self.cwd.join(dir)),
            None => ChangeLogWriter::new(&self.cwd),
        }
    }
}
