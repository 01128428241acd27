//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, ItemsResponse};
use tally_core::{aggregate, evaluate_budgets_with, latest_month, Budget, BudgetStatus, Period};

/// Query parameters for budget status
#[derive(Debug, Deserialize)]
pub struct BudgetStatusQuery {
    /// "all" or YYYY-MM; defaults to the latest month with data
    pub period: Option<String>,
}

/// Request body for replacing the budget list
#[derive(Debug, Deserialize)]
pub struct ReplaceBudgetsRequest {
    pub items: Vec<Budget>,
}

/// Response for budget replacement
#[derive(Debug, Serialize)]
pub struct ReplaceBudgetsResponse {
    pub success: bool,
    pub count: usize,
}

/// GET /api/budgets - The configured budget list
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsResponse<Budget>>, AppError> {
    let snapshot = state.snapshot()?;
    Ok(Json(ItemsResponse {
        items: snapshot.budgets.clone(),
    }))
}

/// PUT /api/budgets - Replace the in-memory budget list
///
/// Budgets are owned by the external store; this endpoint only updates the
/// working copy the analytics run against. Entries must name an expense
/// category and carry a positive limit.
pub async fn replace_budgets(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReplaceBudgetsRequest>,
) -> Result<Json<ReplaceBudgetsResponse>, AppError> {
    for budget in &request.items {
        if budget.category.is_income() {
            return Err(AppError::bad_request(
                "Budgets apply to expense categories, not Income",
            ));
        }
        if !budget.monthly_limit.is_finite() || budget.monthly_limit <= 0.0 {
            return Err(AppError::bad_request(&format!(
                "Budget for {} must have a positive limit",
                budget.category
            )));
        }
    }

    let count = request.items.len();
    state.replace_budgets(request.items)?;
    Ok(Json(ReplaceBudgetsResponse {
        success: true,
        count,
    }))
}

/// GET /api/budgets/status - Budget consumption for a period
pub async fn budget_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BudgetStatusQuery>,
) -> Result<Json<Vec<BudgetStatus>>, AppError> {
    let snapshot = state.snapshot()?;

    let period = match params.period.as_deref() {
        Some(raw) => raw
            .parse::<Period>()
            .map_err(|e| AppError::bad_request(&e))?,
        None => match latest_month(&snapshot.transactions) {
            Some(month) => Period::Month(month),
            // No data at all: every budget reads as untouched
            None => Period::All,
        },
    };

    let summary = aggregate(&snapshot.transactions, &period);
    let statuses = evaluate_budgets_with(
        &summary.category_totals,
        &snapshot.budgets,
        &state.analytics.budget,
    );
    Ok(Json(statuses))
}
