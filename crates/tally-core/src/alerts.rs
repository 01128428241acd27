//! Alert synthesis
//!
//! Folds the budget and recurring views into a single user-facing alert
//! list: budget warnings/overages for the latest month with data, plus one
//! informational alert per detected recurring payment.

use crate::aggregate::{aggregate, latest_month};
use crate::budget::evaluate_budgets_with;
use crate::config::AnalyticsConfig;
use crate::models::{
    AlertKind, AlertRecord, AlertSeverity, Budget, BudgetState, Period, Transaction,
};
use crate::recurring::detect_recurring;

/// Build the active alert list for a snapshot.
///
/// Ordered by severity descending (critical, warning, info), stable within
/// a severity. Pure over its inputs: alert ids are content-derived and no
/// wall-clock timestamp is attached.
pub fn build_alerts(
    transactions: &[Transaction],
    budgets: &[Budget],
    config: &AnalyticsConfig,
) -> Vec<AlertRecord> {
    let mut alerts = Vec::new();

    // Budget alerts cover the latest month with data, matching how the
    // dashboard frames "this month's" consumption.
    if let Some(month) = latest_month(transactions) {
        let summary = aggregate(transactions, &Period::Month(month));
        let statuses = evaluate_budgets_with(&summary.category_totals, budgets, &config.budget);

        for status in statuses {
            let (severity, suffix, message) = match status.status {
                BudgetState::Over => (
                    AlertSeverity::Critical,
                    "over",
                    format!(
                        "You have exceeded your {} budget: {:.2} of {:.2}.",
                        status.category, status.spent, status.limit
                    ),
                ),
                BudgetState::Warning => (
                    AlertSeverity::Warning,
                    "warn",
                    format!(
                        "You have used {:.0}% of your {} budget ({:.2} of {:.2}).",
                        status.ratio * 100.0,
                        status.category,
                        status.spent,
                        status.limit
                    ),
                ),
                BudgetState::Ok => continue,
            };
            alerts.push(AlertRecord {
                id: format!("budget-{}-{}", status.category, suffix),
                kind: AlertKind::Budget,
                category: status.category,
                message,
                severity,
            });
        }
    }

    for group in detect_recurring(transactions, config.recurring.min_occurrences) {
        alerts.push(AlertRecord {
            id: format!("recurring-{}-{}", group.category, group.amount),
            kind: AlertKind::Recurring,
            category: group.category,
            message: format!(
                "Probable recurring payment: {} {:.2} seen {} times (first: {}, last: {}).",
                group.category,
                group.amount,
                group.count,
                group.first_seen.format("%Y-%m-%d"),
                group.last_seen.format("%Y-%m-%d")
            ),
            severity: AlertSeverity::Info,
        });
    }

    alerts.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
    alerts
}
