//! Mirror orchestration
//!
//! A run walks every profile whose destination root is present, and for
//! each of its targets invokes the sync tool once, normalizes the output
//! with the source's collapse patterns and appends it to one [`Report`].
//!
//! Invocations are planned up front: every source of every active profile
//! must resolve before the first invocation starts, so a missing source
//! aborts the whole run instead of leaving it half applied.

use bam_output::{Collapser, normalize};

use crate::config::MirrorConfig;
use crate::report::Report;
use crate::source;
use crate::sync::{Invocation, RunMode, SyncTool};
use crate::{Error, Result};

/// One planned invocation and the collapser for its output.
#[derive(Debug, Clone)]
pub struct Job {
    pub invocation: Invocation,
    pub collapser: Collapser,
}

/// Runs a configuration through a sync tool.
pub struct Mirror<T: SyncTool> {
    config: MirrorConfig,
    tool: T,
}

impl<T: SyncTool> Mirror<T> {
    pub fn new(config: MirrorConfig, tool: T) -> Self {
        Self { config, tool }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Resolve every invocation of a run without executing any.
    ///
    /// Profiles whose destination root does not exist are skipped (an
    /// unplugged drive is not an error).
    pub fn plan(&self, mode: RunMode) -> Result<Vec<Job>> {
        let mut jobs = Vec::new();

        for profile in &self.config.profiles {
            if !profile.is_available() {
                tracing::warn!(
                    destination = %profile.destination,
                    "Destination not available, skipping profile"
                );
                continue;
            }

            for target in &profile.targets {
                let source = self.config.source(&target.source).ok_or_else(|| {
                    Error::UnknownSource {
                        name: target.source.clone(),
                    }
                })?;
                let paths = source::resolve(source)?;
                let collapser = Collapser::from_globs(source.collapse.iter().cloned())?;

                jobs.push(Job {
                    invocation: Invocation {
                        source: source.name.clone(),
                        paths,
                        destination: profile.target_destination(target),
                        excludes: source.exclude.clone(),
                        mode,
                    },
                    collapser,
                });
            }
        }

        tracing::debug!(jobs = jobs.len(), %mode, "Planned run");
        Ok(jobs)
    }

    /// Execute a run and return the combined report.
    pub fn run(&self, mode: RunMode) -> Result<Report> {
        let jobs = self.plan(mode)?;
        let mut report = Report::new();

        for Job {
            invocation,
            collapser,
        } in jobs
        {
            tracing::info!(
                source = %invocation.source,
                destination = %invocation.destination,
                %mode,
                "Mirroring"
            );
            let lines = self.tool.run(&invocation)?;
            let output = normalize(lines, &collapser)?;
            report.append(&invocation.source, &invocation.destination, output);
        }

        tracing::info!(
            changes = report.total_changes(),
            deletions = report.total_deletions(),
            %mode,
            "Run complete"
        );
        Ok(report)
    }
}
