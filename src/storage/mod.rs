//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Expenses and budgets live in separate files under `data/`.

pub mod budget;
pub mod expenses;
pub mod file_io;

pub use budget::BudgetRepository;
pub use expenses::{ExpenseRepository, LoadOutcome, RejectedRecord};
pub use file_io::{read_json, read_json_required, stage_json, write_json_atomic, StagedFile};

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::models::CategorySet;
use crate::services::ExpenseManager;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    pub fn new(paths: TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Build a manager from both stores
    ///
    /// Records that failed validation are returned alongside the manager so
    /// the caller can report them.
    pub fn load_manager(
        &self,
        categories: &CategorySet,
    ) -> TrackerResult<(ExpenseManager, Vec<RejectedRecord>)> {
        let outcome = self.expenses.load(categories)?;
        let budgets = self.budgets.load()?;
        Ok((
            ExpenseManager::with_data(outcome.expenses, budgets),
            outcome.rejected,
        ))
    }

    /// Persist the manager's expenses and budgets
    pub fn save_manager(&self, manager: &ExpenseManager) -> TrackerResult<()> {
        self.expenses.save(manager.expenses())?;
        self.budgets.save(manager.budgets())?;
        info!(expenses = manager.len(), "saved tracker state");
        Ok(())
    }

    /// True once expenses have been saved at least once
    pub fn has_expenses_file(&self) -> bool {
        self.paths.expenses_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.has_expenses_file());
    }

    #[test]
    fn test_manager_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let categories = CategorySet::default();

        let mut manager = ExpenseManager::new();
        manager.add(Expense::parse("2024-01-05", "50", "Food & Dining", "Lunch", &categories).unwrap());
        manager.add(Expense::parse("2024-01-10", "30", "Transportation", "Taxi", &categories).unwrap());
        manager.set_budget("Food & Dining", Money::from_cents(40000));
        storage.save_manager(&manager).unwrap();

        let (loaded, rejected) = storage.load_manager(&categories).unwrap();
        assert!(rejected.is_empty());
        assert_eq!(loaded.expenses(), manager.expenses());
        assert_eq!(loaded.budgets(), manager.budgets());
        assert_eq!(loaded.get(0).unwrap().description(), "Taxi");
    }
}
