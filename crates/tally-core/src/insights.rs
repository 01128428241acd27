//! Spend-spike insights
//!
//! Compares the selected period's per-category spend against each
//! category's historical per-month average and flags anomalies, alongside
//! the top expense category and the period's net.

use std::collections::BTreeMap;

use crate::config::InsightConfig;
use crate::models::{Category, Insight, Period, SpikeRecord, TopCategory, Transaction};

/// Compute the insight view for a period using default thresholds.
pub fn compute_insights(transactions: &[Transaction], period: &Period) -> Insight {
    compute_insights_with(transactions, period, &InsightConfig::default())
}

/// Compute the insight view for a period.
///
/// Spikes compare a single month against that category's other active
/// months, so `Period::All` yields no spikes: there is no current month to
/// compare. Months with zero activity in a category are excluded from its
/// baseline rather than counted as zero, so sparse history does not deflate
/// the average. Categories with no history at all never spike.
pub fn compute_insights_with(
    transactions: &[Transaction],
    period: &Period,
    config: &InsightConfig,
) -> Insight {
    let mut net = 0.0;
    // Expense totals within the period, keyed in canonical category order
    // so top-category ties resolve deterministically.
    let mut current_expense: BTreeMap<Category, f64> = BTreeMap::new();

    for tx in transactions {
        if !period.contains(&tx.month_key()) {
            continue;
        }
        if tx.is_income() {
            net += tx.amount;
        } else {
            net -= tx.amount;
            *current_expense.entry(tx.category).or_insert(0.0) += tx.amount;
        }
    }

    let mut top_category: Option<TopCategory> = None;
    for (&category, &amount) in &current_expense {
        let beats_current = top_category
            .as_ref()
            .map(|top| amount > top.amount)
            .unwrap_or(true);
        if beats_current {
            top_category = Some(TopCategory { category, amount });
        }
    }

    let spikes = match period {
        Period::All => Vec::new(),
        Period::Month(month) => detect_spikes(transactions, month, &current_expense, config),
    };

    Insight {
        top_category,
        net,
        spikes,
    }
}

/// Compare each expense category's spend in `month` against its mean over
/// all other months with activity in that category.
fn detect_spikes(
    transactions: &[Transaction],
    month: &str,
    current_expense: &BTreeMap<Category, f64>,
    config: &InsightConfig,
) -> Vec<SpikeRecord> {
    // category -> month -> expense total, across the full history
    let mut by_category: BTreeMap<Category, BTreeMap<String, f64>> = BTreeMap::new();
    for tx in transactions {
        if tx.is_income() {
            continue;
        }
        *by_category
            .entry(tx.category)
            .or_default()
            .entry(tx.month_key())
            .or_insert(0.0) += tx.amount;
    }

    let mut spikes = Vec::new();
    for (&category, &current) in current_expense {
        let Some(months) = by_category.get(&category) else {
            continue;
        };
        let previous: Vec<f64> = months
            .iter()
            .filter(|(m, _)| m.as_str() != month)
            .map(|(_, &total)| total)
            .collect();
        if previous.is_empty() {
            continue; // no history, nothing to compare against
        }
        let avg_previous = previous.iter().sum::<f64>() / previous.len() as f64;
        if avg_previous <= 0.0 {
            continue;
        }
        let ratio = current / avg_previous;
        if ratio >= config.spike_ratio {
            spikes.push(SpikeRecord {
                category,
                current,
                avg_previous,
                ratio,
            });
        }
    }

    spikes.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    spikes
}
