//! Sync-tool output normalization for bam
//!
//! Turns the captured stdout of one `rsync --itemize-changes --stats`
//! invocation into a reviewable summary:
//!
//! - [`split`] partitions the lines into changes, deletions and stats
//! - [`Collapser`] folds runs of lines matching the same glob into a
//!   single `"<prefix> ... <n> lines collapsed"` entry
//! - [`normalize`] does both, collapsing changes and deletions
//!
//! Everything here is pure and synchronous; process handling lives in
//! `bam-core`.
//!
//! # Example
//!
//! ```
//! use bam_output::{Collapser, normalize};
//!
//! let collapser = Collapser::from_globs(["a/*"]).unwrap();
//! let output = normalize(
//!     [
//!         "sending incremental file list",
//!         ">f+++++++++ a/x1.txt",
//!         ">f+++++++++ a/x2.txt",
//!         ">f+++++++++ b/y.txt",
//!         "",
//!         "Number of files: 3",
//!     ],
//!     &collapser,
//! )
//! .unwrap();
//!
//! assert_eq!(output.rendered_changes(), ["a/* ... 2 lines collapsed", "b/y.txt"]);
//! ```

pub mod collapse;
pub mod error;
pub mod glob;
pub mod normalize;
pub mod split;

pub use collapse::{CollapsedEntry, CollapsedLine, Collapser, RunEvent, RunState};
pub use error::{Error, Result};
pub use glob::{GlobPattern, derive_prefix};
pub use normalize::{NormalizedOutput, normalize};
pub use split::{Sections, split, strip_annotation};
