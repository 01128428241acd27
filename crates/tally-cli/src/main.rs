//! Tally CLI - Spending analytics over audited transactions
//!
//! Usage:
//!   tally summary --period 2024-03   Totals and category breakdown
//!   tally recurring                  Likely recurring payments
//!   tally insights                   Spend spikes for the latest month
//!   tally serve --port 3000          Start the web API

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let snapshot = commands::open_snapshot(cli.data.as_deref())?;
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { period } => commands::cmd_summary(&snapshot, &period),
        Commands::Trends => commands::cmd_trends(&snapshot),
        Commands::Transactions { period, limit } => {
            commands::cmd_transactions(&snapshot, &period, limit)
        }
        Commands::Budgets { period } => {
            commands::cmd_budgets(&snapshot, period.as_deref(), &config)
        }
        Commands::Recurring { min_occurrences } => {
            commands::cmd_recurring(&snapshot, min_occurrences, &config)
        }
        Commands::Insights { period } => {
            commands::cmd_insights(&snapshot, period.as_deref(), &config)
        }
        Commands::Alerts => commands::cmd_alerts(&snapshot, &config),
        Commands::Serve {
            port,
            host,
            allow_origin,
        } => commands::cmd_serve(snapshot, config, &host, port, allow_origin).await,
    }
}
