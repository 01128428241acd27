//! Tally Core Library
//!
//! Shared functionality for the Tally expense auditor:
//! - Normalized snapshot loading (JSON and CSV) with boundary validation
//! - Period/category aggregation and monthly trend series
//! - Budget consumption evaluation
//! - Recurring-payment detection
//! - Spend-spike insights
//! - Alert synthesis over the derived views
//!
//! Every analytics function is pure: it takes an immutable slice of the
//! caller's snapshot and returns a derived view. Fetching, storing, and
//! refreshing snapshots belongs to the surrounding application.

pub mod aggregate;
pub mod alerts;
pub mod budget;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod recurring;

pub use aggregate::{aggregate, latest_month, monthly_summary, months_available};
pub use alerts::build_alerts;
pub use budget::{evaluate_budgets, evaluate_budgets_with};
pub use config::{AnalyticsConfig, BudgetConfig, InsightConfig, RecurringConfig};
pub use error::{Error, Result};
pub use import::{load_snapshot, parse_transactions_csv};
pub use insights::{compute_insights, compute_insights_with};
pub use models::{
    AlertKind, AlertRecord, AlertSeverity, Budget, BudgetState, BudgetStatus, Category, Insight,
    MonthlySummaryPoint, Period, RecurringGroup, Snapshot, SpikeRecord, Summary, TopCategory,
    Transaction,
};
pub use recurring::detect_recurring;
