//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation. Without a terminal the
//! prompt returns an error and the run aborts before going live.

use colored::Colorize;
use dialoguer::Confirm;

use bam_core::Report;

use crate::error::Result;

/// Ask before starting a live run.
pub fn confirm_live_run(report: &Report) -> Result<bool> {
    println!();
    if report.total_deletions() > 0 {
        println!(
            "{} {} item(s) will be deleted at the destination.",
            "WARNING".red().bold(),
            report.total_deletions()
        );
    }

    let proceed = Confirm::new()
        .with_prompt("Ready to proceed?")
        .default(false)
        .interact()?;
    Ok(proceed)
}
