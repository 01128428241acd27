//! Snapshot loading for the normalized transaction shape
//!
//! The analytics layer requires a single normalized shape: a JSON snapshot
//! (`{"transactions": [...], "budgets": [...]}`) or a CSV transaction
//! export with the columns
//! `id,timestamp,text,category,amount,confidence,corrected`.
//!
//! Malformed numeric fields are rejected here, at the boundary; the
//! analytics functions assume well-formed input. Unknown category labels
//! are not an error: they normalize to `Unknown`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Budget, Category, Snapshot, Transaction};

/// Load a snapshot from disk, dispatching on file extension: `.csv` is a
/// transactions-only export, anything else is a JSON snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let snapshot = if is_csv {
        let transactions = parse_transactions_csv(File::open(path)?)?;
        Snapshot {
            transactions,
            budgets: Vec::new(),
        }
    } else {
        parse_snapshot_json(File::open(path)?)?
    };

    debug!(
        path = %path.display(),
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Parse a JSON snapshot and validate every record.
pub fn parse_snapshot_json<R: Read>(reader: R) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    for tx in &snapshot.transactions {
        validate_transaction(tx)?;
    }
    for budget in &snapshot.budgets {
        validate_budget(budget)?;
    }
    Ok(snapshot)
}

/// Parse a normalized CSV transaction export.
///
/// Columns: `id,timestamp,text,category,amount,confidence,corrected`.
/// `confidence` may be empty; `corrected` is `true`/`false` (empty = false).
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;

        let id = field(&record, 0, "id")?
            .parse::<i64>()
            .map_err(|_| Error::InvalidData(format!("Invalid id: {:?}", record.get(0))))?;
        let timestamp = parse_timestamp(field(&record, 1, "timestamp")?)?;
        let text = field(&record, 2, "text")?.to_string();
        let category = Category::from_label(field(&record, 3, "category")?);
        let amount = field(&record, 4, "amount")?
            .parse::<f64>()
            .map_err(|_| Error::InvalidData(format!("Invalid amount: {:?}", record.get(4))))?;
        let confidence = match record.get(5).map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
                Error::InvalidData(format!("Invalid confidence: {:?}", raw))
            })?),
        };
        let corrected = match record.get(6).map(str::trim) {
            None | Some("") => false,
            Some(raw) => raw.eq_ignore_ascii_case("true") || raw == "1",
        };

        let tx = Transaction {
            id,
            timestamp,
            text,
            category,
            amount,
            confidence,
            corrected,
        };
        validate_transaction(&tx)?;
        transactions.push(tx);
    }

    Ok(transactions)
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| Error::InvalidData(format!("Missing {} column", name)))
}

/// Parse a timestamp in any of the shapes the store exports: space- or
/// T-separated date-times, or a bare date (midnight).
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        })
        .map_err(|_| Error::InvalidData(format!("Invalid timestamp: {:?}", raw)))
}

/// Boundary validation for a transaction record.
fn validate_transaction(tx: &Transaction) -> Result<()> {
    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "Transaction {} has invalid amount {}",
            tx.id, tx.amount
        )));
    }
    if let Some(confidence) = tx.confidence {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidData(format!(
                "Transaction {} has confidence {} outside [0, 1]",
                tx.id, confidence
            )));
        }
    }
    Ok(())
}

/// Boundary validation for a budget record.
fn validate_budget(budget: &Budget) -> Result<()> {
    if budget.category.is_income() {
        return Err(Error::InvalidData(
            "Budgets apply to expense categories, not Income".to_string(),
        ));
    }
    if !budget.monthly_limit.is_finite() {
        return Err(Error::InvalidData(format!(
            "Budget for {} has non-finite limit",
            budget.category
        )));
    }
    Ok(())
}
