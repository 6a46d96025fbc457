//! Budget repository for JSON storage
//!
//! Budgets are kept in `budget.json` as a flat object mapping category name to
//! monthly amount, independent of the expense store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load budgets; a missing file means no budgets
    pub fn load(&self) -> TrackerResult<BTreeMap<String, Money>> {
        let raw: BTreeMap<String, f64> = read_json(&self.path)?;
        let budgets = amounts_to_money(raw)?;
        info!(count = budgets.len(), "loaded budgets");
        Ok(budgets)
    }

    pub fn save(&self, budgets: &BTreeMap<String, Money>) -> TrackerResult<()> {
        write_json_atomic(&self.path, &money_to_amounts(budgets))?;
        info!(count = budgets.len(), path = %self.path.display(), "saved budgets");
        Ok(())
    }
}

/// Convert a stored `{category: number}` map into cents
pub fn amounts_to_money(raw: BTreeMap<String, f64>) -> TrackerResult<BTreeMap<String, Money>> {
    raw.into_iter()
        .map(|(category, amount)| {
            Money::from_f64(amount)
                .map(|m| (category.clone(), m))
                .map_err(|e| {
                    TrackerError::Storage(format!("Invalid budget for '{}': {}", category, e))
                })
        })
        .collect()
}

/// Convert budgets into the stored `{category: number}` shape
pub fn money_to_amounts(budgets: &BTreeMap<String, Money>) -> BTreeMap<String, f64> {
    budgets
        .iter()
        .map(|(category, amount)| (category.clone(), amount.to_f64()))
        .collect()
}
