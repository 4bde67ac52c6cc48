//! bam CLI
//!
//! Review a dry run of every configured mirror, then run it for real.

mod cli;
mod commands;
mod context;
mod editor;
mod error;
mod interactive;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command.clone() {
        Some(cmd) => execute_command(&cli, cmd),
        None => {
            println!("{} rsync mirror with review", "bam".green().bold());
            println!();
            println!("Run {} for available commands.", "bam --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn execute_command(cli: &Cli, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run { no_review } => commands::run_mirror(&Context::from_cli(cli)?, no_review),
        Commands::Plan { review, json } => {
            commands::run_plan(&Context::from_cli(cli)?, review, json)
        }
        Commands::Config { json } => commands::run_config(&Context::from_cli(cli)?, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bam", &mut io::stdout());
            Ok(())
        }
    }
}
