//! Command implementations

mod reports;
mod serve;

pub use reports::*;
pub use serve::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use tally_core::{AnalyticsConfig, Snapshot};

/// Default snapshot filename, looked up in the working directory first and
/// the platform data directory second.
const DEFAULT_DATA_FILE: &str = "tally.json";

/// Resolve the snapshot path and load it.
pub fn open_snapshot(data: Option<&Path>) -> Result<Snapshot> {
    let path = match data {
        Some(path) => path.to_path_buf(),
        None => default_data_path(),
    };
    tally_core::load_snapshot(&path)
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))
}

/// Load threshold overrides, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AnalyticsConfig::default()),
    }
}

/// `./tally.json` if present, otherwise the platform data directory
/// (e.g. ~/.local/share/tally/tally.json).
fn default_data_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_DATA_FILE);
    if local.exists() {
        return local;
    }
    if let Some(data_dir) = dirs::data_dir() {
        let shared = data_dir.join("tally").join(DEFAULT_DATA_FILE);
        if shared.exists() {
            debug!(path = %shared.display(), "Using data-directory snapshot");
            return shared;
        }
    }
    local
}

/// Truncate a string for fixed-width table cells.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
