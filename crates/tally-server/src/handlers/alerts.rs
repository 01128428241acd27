//! Alert handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState, ItemsResponse};
use tally_core::{build_alerts, AlertRecord};

/// GET /api/alerts - Active budget and recurring-payment alerts
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsResponse<AlertRecord>>, AppError> {
    let snapshot = state.snapshot()?;
    Ok(Json(ItemsResponse {
        items: build_alerts(&snapshot.transactions, &snapshot.budgets, &state.analytics),
    }))
}
