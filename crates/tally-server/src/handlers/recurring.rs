//! Recurring-payment handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, ItemsResponse};
use tally_core::{detect_recurring, RecurringGroup};

/// Query parameters for recurring detection
#[derive(Debug, Deserialize)]
pub struct RecurringQuery {
    /// Minimum repetitions (defaults to the configured threshold)
    pub min_occurrences: Option<usize>,
}

/// GET /api/recurring - Likely recurring payments
pub async fn list_recurring(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecurringQuery>,
) -> Result<Json<ItemsResponse<RecurringGroup>>, AppError> {
    let min_occurrences = params
        .min_occurrences
        .unwrap_or(state.analytics.recurring.min_occurrences);

    let snapshot = state.snapshot()?;
    Ok(Json(ItemsResponse {
        items: detect_recurring(&snapshot.transactions, min_occurrences),
    }))
}
