//! Core orchestration layer for bam
//!
//! This crate turns a mirror configuration into rsync invocations and a
//! reviewable change log:
//!
//! - **Configuration**: `bamrc` and TOML loading with validation
//! - **Source resolution**: glob expansion and fail-closed availability checks
//! - **Sync tool seam**: [`SyncTool`] with the [`Rsync`] implementation
//! - **Mirror**: per-profile, per-source runs accumulated into one [`Report`]
//! - **Change log**: timestamped, atomically written report files
//!
//! # Architecture
//!
//! ```text
//!          bam-cli
//!             |
//!          bam-core
//!             |
//!        bam-output
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bam_core::{ChangeLogWriter, Mirror, MirrorConfig, Rsync, RunMode};
//! use std::path::Path;
//!
//! fn example() -> bam_core::Result<()> {
//!     let config = MirrorConfig::load(Path::new("bamrc"))?;
//!     let mirror = Mirror::new(config, Rsync::default());
//!     let report = mirror.run(RunMode::DryRun)?;
//!     let log = ChangeLogWriter::new(".").write(&report, RunMode::DryRun)?;
//!     println!("review {}", log.display());
//!     Ok(())
//! }
//! ```

pub mod changelog;
pub mod config;
pub mod error;
pub mod mirror;
pub mod report;
pub mod source;
pub mod sync;

pub use changelog::ChangeLogWriter;
pub use config::{MirrorConfig, Profile, Source, Target};
pub use error::{Error, Result};
pub use mirror::{Job, Mirror};
pub use report::{PairSummary, Report};
pub use sync::{Invocation, Rsync, RunMode, SyncTool};
