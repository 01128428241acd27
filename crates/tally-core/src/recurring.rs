//! Recurring-payment detection
//!
//! Groups transactions by the exact (category, amount) pair and flags
//! groups that repeat as likely subscriptions. This is a repetition count,
//! not a cadence check: it does not require monthly (or any) spacing, only
//! the same amount in the same category at least `min_occurrences` times.

use std::collections::HashMap;

use crate::models::{Category, RecurringGroup, Transaction};

/// Detect likely recurring payments.
///
/// Amount equality is exact in the stored currency unit; a 499.00 and a
/// 499.01 charge form distinct groups. Results are ordered by count
/// descending, most recently seen first on ties.
pub fn detect_recurring(transactions: &[Transaction], min_occurrences: usize) -> Vec<RecurringGroup> {
    // Key on the amount's bit pattern so grouping is exact, with no
    // rounding bucket and no float-key hashing trouble.
    let mut groups: HashMap<(Category, u64), RecurringGroup> = HashMap::new();

    for tx in transactions {
        groups
            .entry((tx.category, tx.amount.to_bits()))
            .and_modify(|group| {
                group.count += 1;
                group.first_seen = group.first_seen.min(tx.timestamp);
                group.last_seen = group.last_seen.max(tx.timestamp);
            })
            .or_insert_with(|| RecurringGroup {
                category: tx.category,
                amount: tx.amount,
                count: 1,
                first_seen: tx.timestamp,
                last_seen: tx.timestamp,
            });
    }

    let mut recurring: Vec<RecurringGroup> = groups
        .into_values()
        .filter(|group| group.count >= min_occurrences)
        .collect();

    recurring.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(b.last_seen.cmp(&a.last_seen))
            .then(b.amount.total_cmp(&a.amount))
            .then(a.category.cmp(&b.category))
    });

    recurring
}
