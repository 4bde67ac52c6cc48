//! Shared test utilities for the bam workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`rsync`]: canned rsync output and a scripted fake `rsync` binary
//! - [`workspace`]: [`workspace::TestWorkspace`] for source/destination trees and config files

pub mod rsync;
pub mod workspace;
