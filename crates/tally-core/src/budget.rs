//! Budget consumption evaluation

use std::collections::BTreeMap;

use crate::config::BudgetConfig;
use crate::models::{Budget, BudgetState, BudgetStatus, Category};

/// Evaluate budgets against per-category totals using default thresholds.
pub fn evaluate_budgets(
    category_totals: &BTreeMap<Category, f64>,
    budgets: &[Budget],
) -> Vec<BudgetStatus> {
    evaluate_budgets_with(category_totals, budgets, &BudgetConfig::default())
}

/// Evaluate budgets against per-category totals.
///
/// Output order matches the input budget order; presentation may re-sort.
/// A non-positive limit means "no ceiling": ratio stays 0 and the status is
/// `Ok`, so unset limits never divide by zero or raise spurious alarms.
pub fn evaluate_budgets_with(
    category_totals: &BTreeMap<Category, f64>,
    budgets: &[Budget],
    config: &BudgetConfig,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent = category_totals.get(&budget.category).copied().unwrap_or(0.0);
            let ratio = if budget.monthly_limit > 0.0 {
                spent / budget.monthly_limit
            } else {
                0.0
            };
            let status = if budget.monthly_limit > 0.0 && ratio >= config.over_ratio {
                BudgetState::Over
            } else if budget.monthly_limit > 0.0 && ratio >= config.warning_ratio {
                BudgetState::Warning
            } else {
                BudgetState::Ok
            };
            BudgetStatus {
                category: budget.category,
                limit: budget.monthly_limit,
                spent,
                ratio,
                status,
            }
        })
        .collect()
}
