//! Source path resolution
//!
//! Source paths are handed to rsync without a shell, so any glob in them
//! is expanded here with the `glob` crate. Matching is case-sensitive,
//! `*` never crosses `/`, hidden entries only match a component that
//! itself starts with `.`, and matches come back sorted. A trailing `/`
//! is significant to rsync (copy the directory's contents): it restricts
//! matches to directories and is preserved on every match.

use glob::MatchOptions;

use crate::config::Source;
use crate::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand a source path into the existing paths it denotes.
///
/// A path without wildcards expands to itself when it exists. An empty
/// result means the source is unavailable.
pub fn expand(path: &str) -> Result<Vec<String>> {
    let trailing_slash = path.ends_with('/');
    let entries = glob::glob_with(path, MATCH_OPTIONS).map_err(|e| Error::SourcePattern {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let found = match entry {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable path during expansion");
                continue;
            }
        };
        if trailing_slash && !found.is_dir() {
            continue;
        }
        let found = found.to_string_lossy();
        paths.push(if trailing_slash {
            format!("{}/", found.trim_end_matches('/'))
        } else {
            found.into_owned()
        });
    }
    Ok(paths)
}

/// Expand a configured source, failing when it resolves to nothing.
pub fn resolve(source: &Source) -> Result<Vec<String>> {
    let paths = expand(&source.path)?;
    if paths.is_empty() {
        return Err(Error::SourceUnavailable {
            name: source.name.clone(),
            path: source.path.clone(),
        });
    }
    tracing::debug!(source = %source.name, ?paths, "Resolved source");
    Ok(paths)
}
