//! Serve command implementation

use anyhow::Result;
use tracing::info;

use tally_core::{AnalyticsConfig, Snapshot};
use tally_server::ServerConfig;

pub async fn cmd_serve(
    snapshot: Snapshot,
    analytics: AnalyticsConfig,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    info!(
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        "Serving snapshot on http://{}:{}",
        host,
        port
    );

    let config = ServerConfig { allowed_origins };
    tally_server::run_server(snapshot, analytics, config, host, port).await
}
