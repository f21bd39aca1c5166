//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Run modes - resolve and inspect the run modes of an instance
#[derive(Parser, Debug)]
#[command(name = "runmodes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Instance home directory (holds settings.toml and data/)
    #[arg(long, global = true, env = "RUNMODE_HOME")]
    pub home: Option<PathBuf>,

    /// Base run modes, comma separated (overrides settings and environment)
    #[arg(long, global = true)]
    pub modes: Option<String>,

    /// Option groups, e.g. "a,b|c,d"
    #[arg(long, global = true)]
    pub options: Option<String>,

    /// Install option groups; the selection is kept across restarts
    #[arg(long = "install-options", global = true)]
    pub install_options: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List current run modes
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print instance settings
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the launch properties, sorted by key
    Properties {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Evaluate run mode specifications against the current run modes
    ///
    /// Terms are joined with '.' (AND) and alternatives with ',' (OR);
    /// a leading '-' negates a mode.
    ///
    /// Examples:
    ///   runmodes match author.dev          # 2 when author and dev are active
    ///   runmodes match author -- -publish  # rank several specifications
    Match {
        /// Specifications to evaluate
        #[arg(required = true, allow_hyphen_values = true)]
        specs: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
