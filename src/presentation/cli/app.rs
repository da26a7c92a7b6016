use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vitals: point-in-time system health check
///
/// Collects disk, memory, CPU, network and process metrics, flags
/// threshold breaches and prints prioritized remediation advice.
#[derive(Parser, Debug)]
#[command(name = "vitals")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `scan`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a full diagnostic and print the report
    #[command(alias = "sc")]
    Scan {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the report to the configured output directory
        #[arg(long)]
        save: bool,
    },

    /// Show the effective threshold policy
    #[command(alias = "t")]
    Thresholds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// What runs when no subcommand is given.
    #[must_use]
    pub const fn default_scan() -> Self {
        Self::Scan {
            json: false,
            output: None,
            save: false,
        }
    }
}
