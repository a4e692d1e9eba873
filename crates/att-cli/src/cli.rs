//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Badge swipe attendance reports.
///
/// Reconciles IN/OUT swipes into per-day login, logout, worked and break
/// times, and reports requested people who never swiped.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile swipes into per-day attendance rows.
    Report {
        /// Swipe batch (JSON array or JSON Lines). Use `-` for stdin.
        /// Defaults to `events_path` from the config.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Person to report on. Repeatable; commas separate values.
        #[arg(long)]
        name: Vec<String>,

        /// Badge tag to report on. Repeatable; commas separate values.
        #[arg(long, visible_alias = "rfid")]
        tag: Vec<String>,

        /// Day to report on (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Location to restrict swipes to. Repeatable; commas separate values.
        #[arg(long, visible_alias = "log-cabin")]
        location: Vec<String>,

        /// Output rows as JSON.
        #[arg(long)]
        json: bool,

        /// Only show rows with swipe anomalies.
        #[arg(long)]
        anomalies_only: bool,
    },
}
