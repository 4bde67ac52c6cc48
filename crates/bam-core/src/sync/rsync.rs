//! rsync invocation

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{Invocation, SyncTool};
use crate::{Error, Result};

/// Flags passed on every invocation.
///
/// `--itemize-changes` and `--stats` produce the output grammar the
/// section splitter depends on.
pub const BASE_FLAGS: &[&str] = &[
    "--archive",
    "--partial",
    "--compress",
    "--stats",
    "--itemize-changes",
    "--human-readable",
    "--delete",
    "--delete-delay",
];

/// rsync exit code for "some source files vanished before they could be
/// transferred". The output is still complete.
pub const EXIT_VANISHED: i32 = 24;

/// The rsync binary.
#[derive(Debug, Clone)]
pub struct Rsync {
    program: PathBuf,
}

impl Default for Rsync {
    fn default() -> Self {
        Self::new("rsync")
    }
}

impl Rsync {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for an invocation, in rsync order.
    pub fn args(&self, invocation: &Invocation) -> Vec<String> {
        let mut args: Vec<String> = BASE_FLAGS.iter().map(|f| f.to_string()).collect();
        if invocation.mode.is_dry_run() {
            args.push("--dry-run".to_string());
        }
        args.extend(invocation.excludes.iter().map(|p| format!("--exclude={p}")));
        args.extend(invocation.paths.iter().cloned());
        args.push(invocation.destination.clone());
        args
    }

    /// Shell-quoted command line, for display only.
    pub fn command_line(&self, invocation: &Invocation) -> String {
        let program = self.program.to_string_lossy();
        let args = self.args(invocation);
        let words = std::iter::once(program.as_ref()).chain(args.iter().map(String::as_str));
        shlex::try_join(words.clone())
            .unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }
}

impl SyncTool for Rsync {
    fn run(&self, invocation: &Invocation) -> Result<Vec<String>> {
        tracing::info!("{}", self.command_line(invocation));

        let output = Command::new(&self.program)
            .args(self.args(invocation))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::SyncSpawn {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0) => {}
            Some(EXIT_VANISHED) => tracing::warn!(
                source = %invocation.source,
                "Some files vanished during transfer"
            ),
            code => {
                return Err(Error::SyncFailed {
                    program: self.program.clone(),
                    code: code.unwrap_or(-1),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        tracing::debug!(lines = lines.len(), "Captured rsync output");
        Ok(lines)
    }
}
