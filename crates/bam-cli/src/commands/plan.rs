//! Dry run without a live run

use serde::Serialize;

use bam_core::{Report, RunMode};

use crate::context::Context;
use crate::editor;
use crate::error::Result;

use super::print_summary;

#[derive(Serialize)]
struct PlanOutput<'a> {
    log: String,
    report: &'a Report,
}

/// Run the plan command
///
/// Performs a dry run, writes its change log and prints a summary (or a
/// JSON document with `--json`).
pub fn run_plan(ctx: &Context, review: bool, json: bool) -> Result<()> {
    let mirror = ctx.mirror()?;
    let report = mirror.run(RunMode::DryRun)?;
    let log = ctx.log_writer().write(&report, RunMode::DryRun)?;

    if json {
        let output = PlanOutput {
            log: log.display().to_string(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&report, RunMode::DryRun, &log);
    }

    if review {
        editor::open(&log)?;
    }
    Ok(())
}
