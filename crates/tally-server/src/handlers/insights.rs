//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use tally_core::{compute_insights_with, latest_month, Insight, Period};

/// Query parameters for the insight view
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    /// "all" or YYYY-MM; defaults to the latest month with data
    pub period: Option<String>,
}

/// Insight view plus the period it was computed for
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    /// The resolved period; null when the snapshot is empty
    pub period: Option<String>,
    #[serde(flatten)]
    pub insight: Insight,
}

/// GET /api/insights - Top category, net, and spend spikes
///
/// Without an explicit period this looks at the latest month with data,
/// which is the only window spikes can be computed for.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<InsightResponse>, AppError> {
    let snapshot = state.snapshot()?;

    let period = match params.period.as_deref() {
        Some(raw) => Some(
            raw.parse::<Period>()
                .map_err(|e| AppError::bad_request(&e))?,
        ),
        None => latest_month(&snapshot.transactions).map(Period::Month),
    };

    let Some(period) = period else {
        // Empty snapshot: nothing to analyze
        return Ok(Json(InsightResponse {
            period: None,
            insight: Insight {
                top_category: None,
                net: 0.0,
                spikes: Vec::new(),
            },
        }));
    };

    let insight = compute_insights_with(&snapshot.transactions, &period, &state.analytics.insight);
    Ok(Json(InsightResponse {
        period: Some(period.to_string()),
        insight,
    }))
}
