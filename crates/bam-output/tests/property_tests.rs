use bam_output::{CollapsedLine, Collapser, Error, split};
use proptest::prelude::*;

/// Paths drawn from a small alphabet so that patterns actually match.
fn path() -> impl Strategy<Value = String> {
    "[ab]/[xyz]{1,3}(\\.tmp|\\.txt)?"
}

fn collapser() -> Collapser {
    Collapser::from_globs(["a/x*", "a/*", "*.tmp"]).unwrap()
}

/// A change line: fixed-width code plus a path that cannot be mistaken
/// for a deletion, a boundary or the header.
fn change_line() -> impl Strategy<Value = String> {
    path().prop_map(|p| format!(">f+++++++++ {p}"))
}

fn deletion_line() -> impl Strategy<Value = String> {
    path().prop_map(|p| format!("*deleting   {p}"))
}

fn stats_line() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[ -~]{0,30}"]
}

proptest! {
    #[test]
    fn test_collapse_conserves_line_count(lines in prop::collection::vec(path(), 0..60)) {
        let out = collapser().collapse(lines.clone());
        let total: usize = out.iter().map(CollapsedLine::line_count).sum();
        prop_assert_eq!(total, lines.len());
    }

    #[test]
    fn test_collapse_is_idempotent(lines in prop::collection::vec(path(), 0..60)) {
        let collapser = collapser();
        let once = collapser.collapse(lines);
        let twice = collapser.collapse_items(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_verbatim_lines_never_match(lines in prop::collection::vec(path(), 0..60)) {
        let collapser = collapser();
        for item in collapser.collapse(lines) {
            if let CollapsedLine::Verbatim(line) = item {
                prop_assert!(collapser.first_match(&line).is_none());
            }
        }
    }

    #[test]
    fn test_runs_are_maximal(lines in prop::collection::vec(path(), 0..60)) {
        let collapser = collapser();
        let owners: Vec<Option<usize>> = lines
            .iter()
            .map(|line| collapser.first_match(line).map(|(index, _)| index))
            .collect();

        let mut pos = 0;
        let mut previous: Option<usize> = None;
        for item in collapser.collapse(lines.clone()) {
            let covered = &owners[pos..pos + item.line_count()];
            match item {
                CollapsedLine::Collapsed(_) => {
                    let owner = covered[0];
                    prop_assert!(owner.is_some());
                    prop_assert!(covered.iter().all(|o| *o == owner));
                    // Two adjacent entries never share a pattern
                    if previous.is_some() {
                        prop_assert_ne!(previous, owner);
                    }
                    previous = owner;
                }
                CollapsedLine::Verbatim(_) => {
                    prop_assert_eq!(covered, &[None][..]);
                    previous = None;
                }
            }
            pos += covered.len();
        }
        prop_assert_eq!(pos, lines.len());
    }

    #[test]
    fn test_split_conserves_lines(
        header in any::<bool>(),
        changes in prop::collection::vec(change_line(), 0..20),
        deletions in prop::collection::vec(deletion_line(), 0..20),
        stats in prop::collection::vec(stats_line(), 0..10),
    ) {
        let mut lines = Vec::new();
        if header {
            lines.push("sending incremental file list".to_string());
        }
        lines.extend(changes.iter().cloned());
        lines.extend(deletions.iter().cloned());
        lines.push(String::new());
        lines.extend(stats.iter().cloned());

        let sections = split(lines.clone()).unwrap();

        prop_assert_eq!(sections.changes.len(), changes.len());
        prop_assert_eq!(sections.deletions.len(), deletions.len());
        prop_assert_eq!(&sections.stats, &stats);
        prop_assert_eq!(
            sections.line_count(),
            lines.len() - usize::from(header) - 1
        );
    }

    #[test]
    fn test_split_without_boundary_is_malformed(
        changes in prop::collection::vec(change_line(), 0..20),
        deletions in prop::collection::vec(deletion_line(), 0..20),
    ) {
        let mut lines = changes;
        lines.extend(deletions);
        let result = split(lines);
        prop_assert!(matches!(result, Err(Error::MalformedOutput { .. })), "expected MalformedOutput error");
    }
}
