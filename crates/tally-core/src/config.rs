//! Tunable analytics thresholds
//!
//! The budget, spike, and recurrence thresholds are product constants, but
//! they are deliberately kept as named, overridable values rather than
//! literals scattered through the algorithms. Callers may override them
//! with a TOML file:
//!
//! ```toml
//! [budget]
//! warning_ratio = 0.8
//!
//! [insight]
//! spike_ratio = 2.0
//!
//! [recurring]
//! min_occurrences = 3
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// Budget evaluation thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Spend-to-limit ratio at which a budget turns "warning".
    pub warning_ratio: f64,
    /// Spend-to-limit ratio at which a budget turns "over".
    pub over_ratio: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            warning_ratio: 0.75,
            over_ratio: 1.0,
        }
    }
}

/// Spike detection thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Minimum current-to-baseline ratio for a category to count as a spike.
    pub spike_ratio: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self { spike_ratio: 1.5 }
    }
}

/// Recurring-payment detection thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecurringConfig {
    /// Minimum repetitions of the same (category, amount) pair.
    pub min_occurrences: usize,
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self { min_occurrences: 2 }
    }
}

/// All analytics tunables, grouped by component.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub budget: BudgetConfig,
    pub insight: InsightConfig,
    pub recurring: RecurringConfig,
}

impl AnalyticsConfig {
    /// Load overrides from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!(path = %path.display(), "Loaded analytics config");
        Ok(config)
    }
}
