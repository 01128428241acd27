//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Spending category assigned to a transaction.
///
/// The set is closed: labels outside it normalize to [`Category::Unknown`]
/// at the deserialization boundary instead of failing. `Income` is the only
/// income category; every other label (including `Refund`) counts as an
/// expense.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    Income,
    Refund,
    Expense,
    Unknown,
}

impl Category {
    /// All known categories, in canonical order.
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Travel,
        Self::Shopping,
        Self::Bills,
        Self::Income,
        Self::Refund,
        Self::Expense,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Income => "Income",
            Self::Refund => "Refund",
            Self::Expense => "Expense",
            Self::Unknown => "Unknown",
        }
    }

    /// Lenient label lookup: unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "food" => Self::Food,
            "travel" => Self::Travel,
            "shopping" => Self::Shopping,
            "bills" => Self::Bills,
            "income" => Self::Income,
            "refund" => Self::Refund,
            "expense" => Self::Expense,
            _ => Self::Unknown,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audited transaction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Local date-time the transaction occurred. Month bucketing uses the
    /// calendar date component only, so records either side of midnight at
    /// a month boundary land in different buckets.
    pub timestamp: NaiveDateTime,
    /// Original message text; immutable once ingested.
    pub text: String,
    pub category: Category,
    /// Non-negative magnitude in the account's currency unit.
    pub amount: f64,
    /// Producer-assigned confidence in [0,1]; reset to 1.0 once a human
    /// corrects the category.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// True once a human has edited category or amount.
    #[serde(default)]
    pub corrected: bool,
}

impl Transaction {
    /// Calendar month bucket of this transaction, as "YYYY-MM".
    pub fn month_key(&self) -> String {
        self.timestamp.date().format("%Y-%m").to_string()
    }

    pub fn is_income(&self) -> bool {
        self.category.is_income()
    }
}

/// A user-declared monthly ceiling for one expense category.
///
/// At most one budget per category; created and updated by user action in
/// the surrounding application, read-only to the analytics layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub monthly_limit: f64,
}

/// Aggregation window: all time, or a single calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    All,
    Month(String),
}

impl Period {
    /// Whether a month bucket ("YYYY-MM") falls inside this period.
    pub fn contains(&self, month_key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => m == month_key,
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit)
            && (1..=12).contains(&s[5..].parse::<u8>().unwrap_or(0));
        if well_formed {
            Ok(Self::Month(s.to_string()))
        } else {
            Err(format!("Invalid period: {} (use \"all\" or YYYY-MM)", s))
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month(m) => write!(f, "{}", m),
        }
    }
}

/// The normalized snapshot shape required from the external store.
///
/// Envelope-unwrapping of whatever the store's wire format looks like is
/// the API client's job; by the time data reaches this crate it must
/// already have this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

/// Aggregate totals for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expense; may be negative.
    pub net: f64,
    /// Per-category sums within the period. Categories with no matching
    /// transaction are absent, not present with 0.
    pub category_totals: BTreeMap<Category, f64>,
    /// Distinct months across *all* transactions, newest first.
    pub months_available: Vec<String>,
}

/// One point of the month-over-month trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryPoint {
    pub month: String,
    pub spent: f64,
    pub income: f64,
    pub net: f64,
}

/// A group of transactions sharing identical category and amount,
/// interpreted as a likely repeating payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringGroup {
    pub category: Category,
    /// Exact-match key, not a rounded bucket.
    pub amount: f64,
    pub count: usize,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
}

/// Spend-to-limit classification for a budgeted category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Ok,
    Warning,
    Over,
}

impl BudgetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budget consumption status for one category in the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
    /// spent / limit, or 0 when the limit is non-positive (no ceiling).
    pub ratio: f64,
    pub status: BudgetState,
}

/// The expense category with the largest summed amount in a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: Category,
    pub amount: f64,
}

/// A category whose current-period spend substantially exceeds its
/// historical per-month average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeRecord {
    pub category: Category,
    pub current: f64,
    pub avg_previous: f64,
    /// current / avg_previous.
    pub ratio: f64,
}

/// Derived insight view for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// None when the period contains no expense transactions.
    pub top_category: Option<TopCategory>,
    pub net: f64,
    pub spikes: Vec<SpikeRecord>,
}

/// What kind of condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Budget,
    Recurring,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Recurring => "recurring",
        }
    }
}

/// Severity level of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent).
    pub fn priority(&self) -> u8 {
        match self {
            Self::Info => 1,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing alert synthesized from the derived views.
///
/// Carries no wall-clock timestamp: identical inputs must produce
/// identical output, so the id is derived from content instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub kind: AlertKind,
    pub category: Category,
    pub message: String,
    pub severity: AlertSeverity,
}
