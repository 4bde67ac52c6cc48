//! Configuration listing

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Run the config command
///
/// Prints the sources and profiles the configuration declares, marking
/// profiles whose destination is currently unavailable.
pub fn run_config(ctx: &Context, json: bool) -> Result<()> {
    let path = ctx.config_path();
    let config = ctx.load_config()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration".bold());
    println!();
    println!("{}:   {}", "Path".dimmed(), path.display());
    println!();

    println!("{}:", "Sources".bold());
    if config.sources.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for source in &config.sources {
        println!("  {} {} {}", "+".green(), source.name.cyan(), source.path);
        for pattern in &source.exclude {
            println!("      {} {}", "exclude".dimmed(), pattern);
        }
        for pattern in &source.collapse {
            println!("      {} {}", "collapse".dimmed(), pattern);
        }
    }
    println!();

    println!("{}:", "Profiles".bold());
    if config.profiles.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for profile in &config.profiles {
        let status = if profile.is_available() {
            "available".green()
        } else {
            "unavailable".yellow()
        };
        println!("  {} {} ({})", "=>".blue(), profile.destination.cyan(), status);
        for target in &profile.targets {
            println!(
                "      {} {} {}",
                target.source,
                "->".dimmed(),
                profile.target_destination(target)
            );
        }
    }
    Ok(())
}
