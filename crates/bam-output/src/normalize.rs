//! Split-then-collapse over one sync invocation's output

use crate::Result;
use crate::collapse::{CollapsedLine, Collapser};
use crate::split::{Sections, split};

/// Normalized output of one sync invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedOutput {
    pub changes: Vec<CollapsedLine>,
    pub deletions: Vec<CollapsedLine>,
    pub stats: Vec<String>,
}

impl NormalizedOutput {
    /// Number of changed items before collapsing.
    pub fn change_count(&self) -> usize {
        self.changes.iter().map(CollapsedLine::line_count).sum()
    }

    /// Number of deleted items before collapsing.
    pub fn deletion_count(&self) -> usize {
        self.deletions.iter().map(CollapsedLine::line_count).sum()
    }

    pub fn rendered_changes(&self) -> Vec<String> {
        render(&self.changes)
    }

    pub fn rendered_deletions(&self) -> Vec<String> {
        render(&self.deletions)
    }
}

fn render(lines: &[CollapsedLine]) -> Vec<String> {
    lines.iter().map(ToString::to_string).collect()
}

/// Split raw output into sections and collapse changes and deletions.
///
/// Stats are never collapsed.
pub fn normalize<I, S>(lines: I, collapser: &Collapser) -> Result<NormalizedOutput>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let Sections {
        changes,
        deletions,
        stats,
    } = split(lines)?;

    Ok(NormalizedOutput {
        changes: collapser.collapse(changes),
        deletions: collapser.collapse(deletions),
        stats,
    })
}
