//! Run mode CLI
//!
//! Resolves the run modes of an instance home and prints them.

mod cli;
mod commands;
mod context;
mod error;

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::CommandContext;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    let ctx = CommandContext::from_cli(&cli);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            // No command provided - show help hint
            println!("{} Run mode settings", "runmodes".green().bold());
            println!();
            println!("Run {} for available commands.", "runmodes --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &CommandContext, cmd: Commands) -> Result<()> {
    let settings = ctx.load_settings()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Commands::List { json } => commands::run_list(&mut out, &settings, json)?,
        Commands::Status { json } => commands::run_status(&mut out, &settings, json)?,
        Commands::Properties { json } => commands::run_properties(&mut out, &settings, json)?,
        Commands::Match { specs, json } => commands::run_match(&mut out, &settings, &specs, json)?,
    }
    out.flush()?;
    Ok(())
}
