//! The review-then-mirror workflow

use colored::Colorize;

use bam_core::RunMode;

use crate::context::Context;
use crate::error::Result;
use crate::{editor, interactive};

use super::print_summary;

/// Run the mirror command
///
/// Dry run, change log, review in the editor, confirmation, then the live
/// run with its own change log. Declining the confirmation changes
/// nothing.
pub fn run_mirror(ctx: &Context, no_review: bool) -> Result<()> {
    let mirror = ctx.mirror()?;
    let writer = ctx.log_writer();

    println!("{} Dry run...", "=>".blue().bold());
    let dry_run = mirror.run(RunMode::DryRun)?;
    let dry_log = writer.write(&dry_run, RunMode::DryRun)?;
    print_summary(&dry_run, RunMode::DryRun, &dry_log);

    if dry_run.pairs.is_empty() {
        println!();
        println!("{} Nothing to mirror.", "OK".green().bold());
        return Ok(());
    }

    if !no_review {
        editor::open(&dry_log)?;
    }

    if !interactive::confirm_live_run(&dry_run)? {
        println!("Didn't receive confirmation. Aborting.");
        return Ok(());
    }

    println!("{} Live run...", "=>".blue().bold());
    let live = mirror.run(RunMode::Live)?;
    let live_log = writer.write(&live, RunMode::Live)?;
    print_summary(&live, RunMode::Live, &live_log);

    println!();
    println!(
        "{} Finished running. Log: {}",
        "OK".green().bold(),
        live_log.display()
    );
    Ok(())
}
