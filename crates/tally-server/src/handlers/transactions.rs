//! Transaction listing handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use tally_core::{months_available, Transaction};

use super::parse_period;

fn default_limit() -> usize {
    50
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// "all" or YYYY-MM (default: all)
    pub period: Option<String>,
    /// Maximum rows to return (default 50)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Transaction listing with period-selector data
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub items: Vec<Transaction>,
    pub months_available: Vec<String>,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let period = parse_period(params.period.as_deref())?;
    let limit = params.limit.min(MAX_PAGE_LIMIT);

    let snapshot = state.snapshot()?;
    let mut items: Vec<Transaction> = snapshot
        .transactions
        .iter()
        .filter(|tx| period.contains(&tx.month_key()))
        .cloned()
        .collect();
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    items.truncate(limit);

    Ok(Json(TransactionsResponse {
        items,
        months_available: months_available(&snapshot.transactions),
    }))
}
