//! Opening change logs for review

use std::path::Path;
use std::process::Command;

use crate::error::{CliError, Result};

/// Editor used when `$EDITOR` is unset or empty.
pub const DEFAULT_EDITOR: &str = "vim";

/// Split an `$EDITOR` value into program and arguments.
///
/// Values like `code --wait` are split with shell quoting rules.
pub fn editor_command(editor: Option<&str>) -> Result<Vec<String>> {
    let editor = editor
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EDITOR);
    match shlex::split(editor) {
        Some(words) if !words.is_empty() => Ok(words),
        _ => Err(CliError::user(format!("Cannot parse EDITOR value: {editor}"))),
    }
}

/// Open `path` in the user's editor and wait for it to exit.
pub fn open(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR").ok();
    let words = editor_command(editor.as_deref())?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| CliError::user("Empty editor command"))?;

    tracing::debug!(%program, ?args, ?path, "Opening editor");
    let status = Command::new(program).args(args).arg(path).status()?;
    if !status.success() {
        tracing::warn!(%program, ?status, "Editor exited unsuccessfully");
    }
    Ok(())
}
