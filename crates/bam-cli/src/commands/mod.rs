//! Command implementations for bam-cli

pub mod config;
pub mod plan;
pub mod run;

pub use config::run_config;
pub use plan::run_plan;
pub use run::run_mirror;

use std::path::Path;

use colored::Colorize;

use bam_core::{Report, RunMode};

/// Print per-pair counts and the log location of a finished run.
pub fn print_summary(report: &Report, mode: RunMode, log: &Path) {
    println!();
    println!("{} ({}):", "Summary".bold(), mode);
    if report.pairs.is_empty() {
        println!("  {} no destination available", "None".dimmed());
    }
    for pair in &report.pairs {
        println!(
            "  {} {} {} {}: {} change(s), {} deletion(s)",
            "+".green(),
            pair.source.cyan(),
            "->".dimmed(),
            pair.destination,
            pair.changes,
            format_deletions(pair.deletions),
        );
    }
    println!();
    println!("{}:   {}", "Log".dimmed(), log.display());
}

fn format_deletions(count: usize) -> String {
    if count > 0 {
        count.to_string().red().bold().to_string()
    } else {
        count.to_string()
    }
}
