//! Combined report across all mirrored pairs

use bam_output::NormalizedOutput;
use serde::Serialize;

/// Section headers of the rendered change log.
pub const CHANGES_HEADER: &str = "##### CHANGES #####";
pub const DELETIONS_HEADER: &str = "##### DELETIONS #####";
pub const STATS_HEADER: &str = "##### STATS INDIVIDUAL #####";

/// Per-pair item counts, before collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairSummary {
    pub source: String,
    pub destination: String,
    pub changes: usize,
    pub deletions: usize,
}

/// Append-only aggregate of every pair processed in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub changes: Vec<String>,
    pub deletions: Vec<String>,
    pub stats: Vec<String>,
    pub pairs: Vec<PairSummary>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the normalized output of one source→destination pair.
    pub fn append(&mut self, source: &str, destination: &str, output: NormalizedOutput) {
        self.pairs.push(PairSummary {
            source: source.to_string(),
            destination: destination.to_string(),
            changes: output.change_count(),
            deletions: output.deletion_count(),
        });
        self.changes.extend(output.rendered_changes());
        self.deletions.extend(output.rendered_deletions());
        self.stats.extend(output.stats);
    }

    pub fn total_changes(&self) -> usize {
        self.pairs.iter().map(|p| p.changes).sum()
    }

    pub fn total_deletions(&self) -> usize {
        self.pairs.iter().map(|p| p.deletions).sum()
    }

    /// Render the change log text.
    pub fn render(&self) -> String {
        format!(
            "{CHANGES_HEADER}\n{}\n\n{DELETIONS_HEADER}\n{}\n\n{STATS_HEADER}\n{}",
            self.changes.join("\n"),
            self.deletions.join("\n"),
            self.stats.join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bam_output::{Collapser, normalize};
    use bam_test_utils::rsync::rsync_output;
    use pretty_assertions::assert_eq;

    fn output(changes: &[&str], deletions: &[&str], collapse: &[&str]) -> NormalizedOutput {
        let collapser = Collapser::from_globs(collapse.iter().copied()).unwrap();
        normalize(rsync_output(changes, deletions), &collapser).unwrap()
    }

    #[test]
    fn test_append_accumulates_in_order() {
        let mut report = Report::new();
        report.append("docs", "/mnt/docs", output(&["a", "b"], &["c"], &[]));
        report.append("pics", "/mnt/pics", output(&["x/1", "x/2"], &[], &["x/*"]));

        assert_eq!(report.changes, ["a", "b", "x/* ... 2 lines collapsed"]);
        assert_eq!(report.deletions, ["c"]);
        assert_eq!(report.total_changes(), 4);
        assert_eq!(report.total_deletions(), 1);
        assert_eq!(report.pairs[1].source, "pics");
        assert_eq!(report.pairs[1].changes, 2);
    }

    #[test]
    fn test_render() {
        let report = Report {
            changes: vec!["a".into(), "b/* ... 3 lines collapsed".into()],
            deletions: vec!["old".into()],
            stats: vec!["Number of files: 4".into(), "".into(), "sent 1 bytes".into()],
            pairs: Vec::new(),
        };

        insta::assert_snapshot!(report.render(), @r###"
        ##### CHANGES #####
        a
        b/* ... 3 lines collapsed

        ##### DELETIONS #####
        old

        ##### STATS INDIVIDUAL #####
        Number of files: 4

        sent 1 bytes
        "###);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            Report::new().render(),
            "##### CHANGES #####\n\n\n##### DELETIONS #####\n\n\n##### STATS INDIVIDUAL #####\n"
        );
    }
}
