//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Review and summarize your categorized spending
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Analytics over audited transaction snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file: a JSON snapshot or a normalized CSV transaction export
    ///
    /// Defaults to ./tally.json, falling back to the platform data
    /// directory (e.g. ~/.local/share/tally/tally.json).
    #[arg(long, short = 'd', global = true)]
    pub data: Option<PathBuf>,

    /// Optional TOML file overriding analytics thresholds
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show totals and category breakdown
    Summary {
        /// Period: "all" or YYYY-MM
        #[arg(short, long, default_value = "all")]
        period: String,
    },

    /// Show the month-over-month trend series
    Trends,

    /// List recent transactions
    Transactions {
        /// Period: "all" or YYYY-MM
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show budget consumption status
    Budgets {
        /// Period: "all" or YYYY-MM (defaults to the latest month with data)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List likely recurring payments
    Recurring {
        /// Minimum repetitions of the same (category, amount) pair
        #[arg(short, long)]
        min_occurrences: Option<usize>,
    },

    /// Show top category, net, and spend spikes
    Insights {
        /// Period: YYYY-MM (defaults to the latest month with data)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List active alerts
    Alerts,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origins (repeatable)
        #[arg(long)]
        allow_origin: Vec<String>,
    },
}
