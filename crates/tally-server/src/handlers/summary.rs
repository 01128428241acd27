//! Summary handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, ItemsResponse};
use tally_core::{aggregate, monthly_summary, MonthlySummaryPoint, Summary};

use super::parse_period;

/// Query parameters for the summary view
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// "all" or YYYY-MM (default: all)
    pub period: Option<String>,
}

/// GET /api/summary - Totals and category breakdown for a period
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<Summary>, AppError> {
    let period = parse_period(params.period.as_deref())?;
    let snapshot = state.snapshot()?;
    Ok(Json(aggregate(&snapshot.transactions, &period)))
}

/// GET /api/monthly-summary - Per-month spent/income/net series
pub async fn get_monthly_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsResponse<MonthlySummaryPoint>>, AppError> {
    let snapshot = state.snapshot()?;
    Ok(Json(ItemsResponse {
        items: monthly_summary(&snapshot.transactions),
    }))
}
