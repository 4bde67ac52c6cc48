//! rsync output fixtures.
//!
//! Output is shaped like `rsync --itemize-changes --stats` so that it goes
//! through the real section splitter.

use std::fs;
use std::path::{Path, PathBuf};

/// Change code used for fixture change lines (a new regular file).
pub const NEW_FILE_CODE: &str = ">f+++++++++ ";

/// Deletion marker used for fixture deletion lines.
pub const DELETING_CODE: &str = "*deleting   ";

/// A representative `--stats` block, as printed after the item list.
pub const STATS_BLOCK: &[&str] = &[
    "Number of files: 4 (reg: 3, dir: 1)",
    "Number of created files: 2 (reg: 2)",
    "Number of deleted files: 1 (reg: 1)",
    "Number of regular files transferred: 2",
    "Total file size: 1.20K bytes",
    "Total transferred file size: 800 bytes",
    "",
    "sent 1.05K bytes  received 64 bytes  2.22K bytes/sec",
    "total size is 1.20K  speedup is 1.08",
];

/// Build a complete rsync output from item paths.
///
/// Changes get [`NEW_FILE_CODE`], deletions get [`DELETING_CODE`], and the
/// item list is followed by a blank line and [`STATS_BLOCK`].
pub fn rsync_output(changes: &[&str], deletions: &[&str]) -> Vec<String> {
    let mut lines = vec!["sending incremental file list".to_string()];
    lines.extend(changes.iter().map(|c| format!("{NEW_FILE_CODE}{c}")));
    lines.extend(deletions.iter().map(|d| format!("{DELETING_CODE}{d}")));
    lines.push(String::new());
    lines.extend(STATS_BLOCK.iter().map(|s| s.to_string()));
    lines
}

/// Same as [`rsync_output`], joined into the text a process would print.
pub fn rsync_stdout(changes: &[&str], deletions: &[&str]) -> String {
    let mut text = rsync_output(changes, deletions).join("\n");
    text.push('\n');
    text
}

/// A shell script standing in for `rsync`.
///
/// Every invocation appends its arguments to an args log and prints the
/// configured stdout.
#[derive(Debug, Clone)]
pub struct FakeRsync {
    /// Path to pass as the rsync program.
    pub program: PathBuf,
    args_log: PathBuf,
}

const END_OF_INVOCATION: &str = "::end::";

impl FakeRsync {
    /// Install the script into `dir`.
    ///
    /// # Panics
    /// Panics if the files cannot be written.
    #[cfg(unix)]
    pub fn install(dir: &Path, stdout: &str, exit_code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let program = dir.join("fake-rsync");
        let stdout_file = dir.join("fake-rsync.stdout");
        let args_log = dir.join("fake-rsync.args");

        fs::write(&stdout_file, stdout)
            .unwrap_or_else(|e| panic!("FakeRsync::install: failed to write stdout: {e}"));
        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{args}'; done\n\
             printf '%s\\n' '{END_OF_INVOCATION}' >> '{args}'\n\
             cat '{stdout}'\n\
             exit {exit_code}\n",
            args = args_log.display(),
            stdout = stdout_file.display(),
        );
        fs::write(&program, script)
            .unwrap_or_else(|e| panic!("FakeRsync::install: failed to write script: {e}"));
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("FakeRsync::install: failed to chmod script: {e}"));

        Self { program, args_log }
    }

    /// Arguments of every recorded invocation, oldest first.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        let Ok(log) = fs::read_to_string(&self.args_log) else {
            return Vec::new();
        };
        let mut invocations = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == END_OF_INVOCATION {
                invocations.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        invocations
    }
}
