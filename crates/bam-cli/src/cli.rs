//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// bam - review, then mirror your sources to backup drives with rsync
#[derive(Parser, Debug)]
#[command(name = "bam")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file [default: ./bamrc, then <config dir>/bam/bamrc]
    #[arg(short, long, global = true, env = "BAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// rsync program to invoke
    #[arg(long, global = true, env = "BAM_RSYNC", default_value = "rsync")]
    pub rsync: PathBuf,

    /// Directory for change logs [default: temp dir for dry runs, working dir for live runs]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Dry run, review the change log, confirm, then mirror for real
    ///
    /// The dry-run change log is opened in $EDITOR (default: vim).
    /// Nothing is changed at the destination until you confirm.
    Run {
        /// Do not open the dry-run change log in an editor
        #[arg(long)]
        no_review: bool,
    },

    /// Dry run only: write the change log and summarize it
    Plan {
        /// Open the change log in $EDITOR
        #[arg(long)]
        review: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed configuration
    Config {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   bam completions bash > ~/.local/share/bash-completion/completions/bam
    ///   bam completions zsh > ~/.zfunc/_bam
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
