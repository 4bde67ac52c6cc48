//! Run collapsing
//!
//! Consecutive lines matching the same collapse pattern are replaced by a
//! single [`CollapsedEntry`]. Each line is tested against the patterns in
//! configured order and the first match wins. The entry's prefix is
//! derived once, from the first line of its run.

use std::fmt;

use crate::Result;
use crate::glob::{GlobPattern, derive_prefix};

/// Summary of one run of lines that matched the same pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedEntry {
    pub prefix: String,
    pub count: usize,
}

impl fmt::Display for CollapsedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ... {} lines collapsed", self.prefix, self.count)
    }
}

/// One element of collapser output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollapsedLine {
    /// A line that matched no pattern, unchanged.
    Verbatim(String),
    /// A run of matching lines.
    Collapsed(CollapsedEntry),
}

impl CollapsedLine {
    /// Number of original lines this element stands for.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Verbatim(_) => 1,
            Self::Collapsed(entry) => entry.count,
        }
    }
}

impl fmt::Display for CollapsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim(line) => f.write_str(line),
            Self::Collapsed(entry) => entry.fmt(f),
        }
    }
}

/// Input to a single [`RunState`] transition.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A line matched the pattern at `index` in the configured list.
    Matched {
        index: usize,
        pattern: &'a GlobPattern,
        line: &'a str,
    },
    /// An item that does not take part in collapsing.
    Unmatched(CollapsedLine),
    /// End of input.
    End,
}

/// State carried across one collapsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    InRun {
        /// Index of the pattern that owns the run.
        pattern: usize,
        prefix: String,
        count: usize,
    },
}

impl RunState {
    /// Apply one event, appending any finished output to `out`.
    pub fn advance(self, event: RunEvent<'_>, out: &mut Vec<CollapsedLine>) -> RunState {
        match (self, event) {
            (
                RunState::InRun {
                    pattern,
                    prefix,
                    count,
                },
                RunEvent::Matched { index, .. },
            ) if pattern == index => RunState::InRun {
                pattern,
                prefix,
                count: count + 1,
            },
            (
                state,
                RunEvent::Matched {
                    index,
                    pattern,
                    line,
                },
            ) => {
                state.flush(out);
                RunState::InRun {
                    pattern: index,
                    prefix: derive_prefix(pattern, line),
                    count: 1,
                }
            }
            (state, RunEvent::Unmatched(item)) => {
                state.flush(out);
                out.push(item);
                RunState::Idle
            }
            (state, RunEvent::End) => {
                state.flush(out);
                RunState::Idle
            }
        }
    }

    fn flush(self, out: &mut Vec<CollapsedLine>) {
        if let RunState::InRun { prefix, count, .. } = self {
            out.push(CollapsedLine::Collapsed(CollapsedEntry { prefix, count }));
        }
    }
}

/// Collapses runs of lines using an ordered list of glob patterns.
#[derive(Debug, Clone, Default)]
pub struct Collapser {
    patterns: Vec<GlobPattern>,
}

impl Collapser {
    pub fn new(patterns: Vec<GlobPattern>) -> Self {
        Self { patterns }
    }

    /// Compile the given globs, preserving their order.
    pub fn from_globs<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = globs
            .into_iter()
            .map(GlobPattern::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// The first pattern, in configured order, that matches `line`.
    pub fn first_match(&self, line: &str) -> Option<(usize, &GlobPattern)> {
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, pattern)| pattern.is_match(line))
    }

    /// Collapse a sequence of raw lines.
    ///
    /// # Example
    /// ```
    /// use bam_output::Collapser;
    ///
    /// let collapser = Collapser::from_globs(["cache/*"]).unwrap();
    /// let out: Vec<String> = collapser
    ///     .collapse(["cache/1", "cache/2", "notes.txt"])
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    /// assert_eq!(out, ["cache/* ... 2 lines collapsed", "notes.txt"]);
    /// ```
    pub fn collapse<I, S>(&self, lines: I) -> Vec<CollapsedLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collapse_items(lines.into_iter().map(|l| CollapsedLine::Verbatim(l.into())))
    }

    /// Collapse a sequence that may already contain collapsed entries.
    ///
    /// Existing entries are opaque: they never match a pattern and they
    /// end any open run.
    pub fn collapse_items<I>(&self, items: I) -> Vec<CollapsedLine>
    where
        I: IntoIterator<Item = CollapsedLine>,
    {
        let mut out = Vec::new();
        let mut state = RunState::Idle;
        let mut consumed = 0usize;

        for item in items {
            consumed += item.line_count();
            state = match item {
                CollapsedLine::Verbatim(line) => match self.first_match(&line) {
                    Some((index, pattern)) => state.advance(
                        RunEvent::Matched {
                            index,
                            pattern,
                            line: &line,
                        },
                        &mut out,
                    ),
                    None => state.advance(
                        RunEvent::Unmatched(CollapsedLine::Verbatim(line)),
                        &mut out,
                    ),
                },
                entry @ CollapsedLine::Collapsed(_) => {
                    state.advance(RunEvent::Unmatched(entry), &mut out)
                }
            };
        }
        state.advance(RunEvent::End, &mut out);

        tracing::debug!(consumed, emitted = out.len(), "Collapsed lines");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::new(pattern).unwrap()
    }

    fn rendered(lines: &[CollapsedLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_entry_rendering() {
        let entry = CollapsedEntry {
            prefix: "a/*".into(),
            count: 1,
        };
        assert_eq!(entry.to_string(), "a/* ... 1 lines collapsed");
    }

    #[test]
    fn test_idle_match_starts_run() {
        let pattern = glob("src/*");
        let mut out = Vec::new();
        let state = RunState::Idle.advance(
            RunEvent::Matched {
                index: 0,
                pattern: &pattern,
                line: "src/main.rs",
            },
            &mut out,
        );
        assert_eq!(
            state,
            RunState::InRun {
                pattern: 0,
                prefix: "src/*".into(),
                count: 1
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_same_pattern_increments_without_recomputing_prefix() {
        let pattern = glob("src/*");
        let mut out = Vec::new();
        let state = RunState::InRun {
            pattern: 0,
            prefix: "first*".into(),
            count: 4,
        }
        .advance(
            RunEvent::Matched {
                index: 0,
                pattern: &pattern,
                line: "src/lib.rs",
            },
            &mut out,
        );
        assert_eq!(
            state,
            RunState::InRun {
                pattern: 0,
                prefix: "first*".into(),
                count: 5
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_different_pattern_flushes_and_restarts() {
        let other = glob("docs/*");
        let mut out = Vec::new();
        let state = RunState::InRun {
            pattern: 0,
            prefix: "src/*".into(),
            count: 2,
        }
        .advance(
            RunEvent::Matched {
                index: 1,
                pattern: &other,
                line: "docs/a.md",
            },
            &mut out,
        );
        assert_eq!(
            state,
            RunState::InRun {
                pattern: 1,
                prefix: "docs/*".into(),
                count: 1
            }
        );
        assert_eq!(rendered(&out), ["src/* ... 2 lines collapsed"]);
    }

    #[test]
    fn test_unmatched_flushes_then_emits() {
        let mut out = Vec::new();
        let state = RunState::InRun {
            pattern: 0,
            prefix: "src/*".into(),
            count: 3,
        }
        .advance(
            RunEvent::Unmatched(CollapsedLine::Verbatim("README".into())),
            &mut out,
        );
        assert_eq!(state, RunState::Idle);
        assert_eq!(rendered(&out), ["src/* ... 3 lines collapsed", "README"]);
    }

    #[test]
    fn test_idle_unmatched_passes_through() {
        let mut out = Vec::new();
        let state = RunState::Idle.advance(
            RunEvent::Unmatched(CollapsedLine::Verbatim("README".into())),
            &mut out,
        );
        assert_eq!(state, RunState::Idle);
        assert_eq!(out, [CollapsedLine::Verbatim("README".into())]);
    }

    #[test]
    fn test_end_flushes_open_run() {
        let mut out = Vec::new();
        let state = RunState::InRun {
            pattern: 0,
            prefix: "x*".into(),
            count: 7,
        }
        .advance(RunEvent::End, &mut out);
        assert_eq!(state, RunState::Idle);
        assert_eq!(rendered(&out), ["x* ... 7 lines collapsed"]);

        let mut out = Vec::new();
        RunState::Idle.advance(RunEvent::End, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_match_still_collapses() {
        let collapser = Collapser::from_globs(["a/*"]).unwrap();
        let out = collapser.collapse(["a/x"]);
        assert_eq!(rendered(&out), ["a/* ... 1 lines collapsed"]);
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let collapser = Collapser::from_globs(["a/b/*", "a/*"]).unwrap();
        let out = collapser.collapse(["a/b/1", "a/b/2", "a/c"]);
        assert_eq!(
            rendered(&out),
            ["a/b/* ... 2 lines collapsed", "a/* ... 1 lines collapsed"]
        );

        let reversed = Collapser::from_globs(["a/*", "a/b/*"]).unwrap();
        let out = reversed.collapse(["a/b/1", "a/b/2", "a/c"]);
        assert_eq!(rendered(&out), ["a/* ... 3 lines collapsed"]);
    }

    #[test]
    fn test_interleaved_patterns_never_merge() {
        let collapser = Collapser::from_globs(["*.jpg", "*.png"]).unwrap();
        let out = collapser.collapse(["1.jpg", "2.png", "3.jpg"]);
        assert_eq!(
            rendered(&out),
            [
                "*.jpg ... 1 lines collapsed",
                "*.png ... 1 lines collapsed",
                "*.jpg ... 1 lines collapsed",
            ]
        );
    }

    #[test]
    fn test_prefix_comes_from_first_line_of_run() {
        let collapser = Collapser::from_globs(["photos/20*/raw/*"]).unwrap();
        let out = collapser.collapse(["photos/2023/raw/a", "photos/2024/raw/b"]);
        assert_eq!(rendered(&out), ["photos/20* ... 2 lines collapsed"]);
    }

    #[test]
    fn test_existing_entries_are_opaque() {
        let collapser = Collapser::from_globs(["a/*"]).unwrap();
        let items = vec![
            CollapsedLine::Verbatim("a/1".into()),
            CollapsedLine::Collapsed(CollapsedEntry {
                prefix: "a/*".into(),
                count: 3,
            }),
            CollapsedLine::Verbatim("a/2".into()),
        ];
        let out = collapser.collapse_items(items);
        assert_eq!(
            rendered(&out),
            [
                "a/* ... 1 lines collapsed",
                "a/* ... 3 lines collapsed",
                "a/* ... 1 lines collapsed",
            ]
        );
    }

    #[test]
    fn test_no_patterns_is_identity() {
        let collapser = Collapser::default();
        let out = collapser.collapse(["x", "y"]);
        assert_eq!(rendered(&out), ["x", "y"]);
    }
}
