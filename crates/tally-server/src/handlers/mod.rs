//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod alerts;
pub mod budgets;
pub mod insights;
pub mod recurring;
pub mod summary;
pub mod transactions;

// Re-export all handlers for use in router
pub use alerts::*;
pub use budgets::*;
pub use insights::*;
pub use recurring::*;
pub use summary::*;
pub use transactions::*;

use tally_core::Period;

use crate::AppError;

/// Parse an optional `period` query value, defaulting to all time.
pub(crate) fn parse_period(raw: Option<&str>) -> Result<Period, AppError> {
    match raw {
        None => Ok(Period::All),
        Some(raw) => raw
            .parse::<Period>()
            .map_err(|e| AppError::bad_request(&e)),
    }
}
