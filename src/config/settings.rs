//! User settings for the expense tracker
//!
//! Settings live in `config.json`. Every field has a default, so a missing or
//! partial file is fine. The category list here is the set expenses are
//! validated against.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::{CategorySet, DEFAULT_CATEGORIES, DEFAULT_CURRENCY_SYMBOL};
use crate::reports::{DEFAULT_BAR_WIDTH, DEFAULT_RECENT_LIMIT, DEFAULT_TREND_MONTHS};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of most recent backups to keep when pruning
    pub keep: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep: 20 }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    pub currency_symbol: String,

    /// Canonical expense categories, in display order
    pub categories: Vec<String>,

    /// Months looked back by the trends report
    pub trend_months: u32,

    /// Width of the largest bar in the category chart
    pub bar_width: usize,

    /// Expenses listed under "Recent Expenses" in the monthly report
    pub recent_limit: usize,

    /// Backup retention policy
    pub backup_retention: BackupRetention,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            trend_months: DEFAULT_TREND_MONTHS,
            bar_width: DEFAULT_BAR_WIDTH,
            recent_limit: DEFAULT_RECENT_LIMIT,
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// The configured category set, or the defaults if none are configured
    pub fn category_set(&self) -> CategorySet {
        let set = CategorySet::new(self.categories.iter().cloned());
        if set.is_empty() {
            CategorySet::default()
        } else {
            set
        }
    }

    /// Load settings from disk, falling back to defaults if the file doesn't exist
    ///
    /// Nothing is written; callers decide when to persist.
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        read_json(paths.settings_file()).map_err(|e| {
            TrackerError::Config(format!("Failed to load settings: {}", e))
        })
    }

    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
