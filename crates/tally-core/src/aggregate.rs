//! Period/category aggregation
//!
//! Turns the raw transaction list into the totals the dashboard renders:
//! income/expense/net, per-category sums, and the month-over-month trend
//! series. All functions are pure and order-independent over their input.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, MonthlySummaryPoint, Period, Summary, Transaction};

/// Aggregate totals for the given period.
///
/// `months_available` always covers the full transaction list, not just the
/// filtered period: it populates the period selector.
pub fn aggregate(transactions: &[Transaction], period: &Period) -> Summary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut category_totals: BTreeMap<Category, f64> = BTreeMap::new();

    for tx in transactions {
        if !period.contains(&tx.month_key()) {
            continue;
        }
        if tx.is_income() {
            total_income += tx.amount;
        } else {
            total_expense += tx.amount;
        }
        *category_totals.entry(tx.category).or_insert(0.0) += tx.amount;
    }

    Summary {
        total_income,
        total_expense,
        net: total_income - total_expense,
        category_totals,
        months_available: months_available(transactions),
    }
}

/// Distinct "YYYY-MM" buckets across all transactions, newest first.
pub fn months_available(transactions: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = transactions.iter().map(Transaction::month_key).collect();
    months.into_iter().rev().collect()
}

/// The most recent month containing at least one transaction.
pub fn latest_month(transactions: &[Transaction]) -> Option<String> {
    transactions.iter().map(Transaction::month_key).max()
}

/// Per-month spent/income/net series, one point per calendar month present
/// in the data, ascending by month.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummaryPoint> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let entry = by_month.entry(tx.month_key()).or_insert((0.0, 0.0));
        if tx.is_income() {
            entry.1 += tx.amount;
        } else {
            entry.0 += tx.amount;
        }
    }

    by_month
        .into_iter()
        .map(|(month, (spent, income))| MonthlySummaryPoint {
            month,
            spent,
            income,
            net: income - spent,
        })
        .collect()
}
