//! Section splitting for rsync `--itemize-changes --stats` output
//!
//! The output is read in three phases:
//!
//! ```text
//! sending incremental file list      <- header, skipped
//! >f+++++++++ docs/a.txt             <- changes
//! *deleting   docs/old.txt           <- deletions
//!                                    <- boundary, skipped
//! Number of files: 3 (reg: 3)        <- stats, kept verbatim
//! ```
//!
//! Boundaries are recognised from line content only. Output that ends
//! before the boundary, or that has something other than a deletion
//! between the deletions and the boundary, is rejected.

use crate::{Error, Result};

/// Header printed by rsync before the item list.
pub const HEADER_LINE: &str = "sending incremental file list";

/// Prefix of an itemized deletion.
pub const DELETION_PREFIX: &str = "*deleting   ";

/// Prefix of the first line of the `--stats` block.
pub const STATS_HEADER_PREFIX: &str = "Number of files";

/// Width of the per-item change code (`>f.st......` plus separator).
pub const ANNOTATION_WIDTH: usize = DELETION_PREFIX.len();

/// The three sections of one sync invocation's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    /// Changed items, annotation stripped.
    pub changes: Vec<String>,
    /// Deleted items, annotation stripped.
    pub deletions: Vec<String>,
    /// Statistics lines, unmodified.
    pub stats: Vec<String>,
}

impl Sections {
    pub fn line_count(&self) -> usize {
        self.changes.len() + self.deletions.len() + self.stats.len()
    }
}

fn is_boundary(line: &str) -> bool {
    line.is_empty() || line.starts_with(STATS_HEADER_PREFIX)
}

/// Remove the fixed-width change code from the front of an item line.
///
/// Counts characters, so multi-byte paths are never cut mid-character.
/// Lines no longer than the annotation strip to the empty string.
pub fn strip_annotation(line: &str) -> &str {
    match line.char_indices().nth(ANNOTATION_WIDTH) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

/// Split captured output lines into changes, deletions and stats.
///
/// # Example
/// ```
/// use bam_output::split;
///
/// let sections = split([
///     "sending incremental file list",
///     ">f+++++++++ notes.txt",
///     "*deleting   old.txt",
///     "",
///     "Number of files: 1",
/// ])
/// .unwrap();
///
/// assert_eq!(sections.changes, ["notes.txt"]);
/// assert_eq!(sections.deletions, ["old.txt"]);
/// assert_eq!(sections.stats, ["Number of files: 1"]);
/// ```
pub fn split<I, S>(lines: I) -> Result<Sections>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
    let mut sections = Sections::default();
    let mut pos = 0;

    // Changes run until the first deletion or boundary
    loop {
        let line = lines.get(pos).ok_or_else(|| {
            Error::malformed("output ended before the deletions or statistics", pos + 1)
        })?;
        if line.starts_with(DELETION_PREFIX) || is_boundary(line) {
            break;
        }
        if line != HEADER_LINE {
            sections.changes.push(strip_annotation(line).to_string());
        }
        pos += 1;
    }

    // Deletions run until the boundary
    loop {
        let line = lines.get(pos).ok_or_else(|| {
            Error::malformed("output ended before the statistics boundary", pos + 1)
        })?;
        if is_boundary(line) {
            break;
        }
        if !line.starts_with(DELETION_PREFIX) {
            return Err(Error::malformed(
                format!("expected a deletion or the statistics boundary, found '{line}'"),
                pos + 1,
            ));
        }
        sections.deletions.push(strip_annotation(line).to_string());
        pos += 1;
    }

    if lines.get(pos).is_some_and(|line| line.is_empty()) {
        pos += 1;
    }
    sections.stats = lines.into_iter().skip(pos).collect();

    tracing::debug!(
        changes = sections.changes.len(),
        deletions = sections.deletions.len(),
        stats = sections.stats.len(),
        "Split sync output"
    );
    Ok(sections)
}
