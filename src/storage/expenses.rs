//! Expense repository for JSON storage
//!
//! Stores expenses in `expenses.json` as an array of flat records. Loading
//! re-validates every record; records that fail are skipped and reported
//! rather than failing the whole load.

use std::path::PathBuf;

use tracing::{info, warn};

use super::file_io::{read_json, write_json_atomic};
use crate::error::TrackerResult;
use crate::models::{CategorySet, Expense, ExpenseRecord};

/// A stored record that could not be turned back into an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the stored array (0-based)
    pub index: usize,
    /// Why the record was rejected
    pub reason: String,
}

/// Result of loading the expense store
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Expenses that passed validation, in stored order
    pub expenses: Vec<Expense>,
    /// Records that were skipped
    pub rejected: Vec<RejectedRecord>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load and validate all stored expenses
    ///
    /// A missing file loads as empty. A file that is not a JSON array is an
    /// error; individual bad records are not.
    pub fn load(&self, categories: &CategorySet) -> TrackerResult<LoadOutcome> {
        let raw: Vec<serde_json::Value> = read_json(&self.path)?;
        let outcome = records_to_expenses(raw, categories);

        info!(
            loaded = outcome.expenses.len(),
            skipped = outcome.rejected.len(),
            "loaded expenses"
        );
        Ok(outcome)
    }

    /// Save all expenses, replacing the stored file
    pub fn save(&self, expenses: &[Expense]) -> TrackerResult<()> {
        let records: Vec<ExpenseRecord> = expenses.iter().map(Expense::to_record).collect();
        write_json_atomic(&self.path, &records)?;
        info!(count = records.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }
}

/// Validate raw JSON values into expenses, collecting failures
pub fn records_to_expenses(
    raw: Vec<serde_json::Value>,
    categories: &CategorySet,
) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for (index, value) in raw.into_iter().enumerate() {
        let parsed = serde_json::from_value::<ExpenseRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(|record| {
                Expense::from_record(&record, categories).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(expense) => outcome.expenses.push(expense),
            Err(reason) => {
                warn!(index, %reason, "skipping invalid stored expense");
                outcome.rejected.push(RejectedRecord { index, reason });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use tempfile::TempDir;

    fn repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("data").join("expenses.json"));
        (temp_dir, repo)
    }

    fn expense(date: &str, amount: &str, category: &str, description: &str) -> Expense {
        Expense::parse(date, amount, category, description, &CategorySet::default()).unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp, repo) = repo();
        let outcome = repo.load(&CategorySet::default()).unwrap();
        assert!(outcome.expenses.is_empty());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp, repo) = repo();
        let expenses = vec![
            expense("2024-02-01", "20", "Food & Dining", "Coffee"),
            expense("2024-01-10", "30.75", "Transportation", "Taxi, late"),
            expense("2024-01-05", "0.01", "Other", ""),
        ];

        repo.save(&expenses).unwrap();
        let outcome = repo.load(&CategorySet::default()).unwrap();

        assert_eq!(outcome.expenses, expenses);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_saved_layout() {
        let (_temp, repo) = repo();
        repo.save(&[expense("2024-01-05", "50", "Food & Dining", "Lunch")])
            .unwrap();

        let text = std::fs::read_to_string(repo.path()).unwrap();
        let date_at = text.find("\"date\"").unwrap();
        let amount_at = text.find("\"amount\"").unwrap();
        let category_at = text.find("\"category\"").unwrap();
        let description_at = text.find("\"description\"").unwrap();
        assert!(date_at < amount_at && amount_at < category_at && category_at < description_at);
        assert!(text.contains("\"amount\": 50.0"));
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let (_temp, repo) = repo();
        std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        std::fs::write(
            repo.path(),
            r#"[
                {"date": "2024-01-05", "amount": 50.0, "category": "Food & Dining", "description": "ok"},
                {"date": "2024-01-05", "amount": -1.0, "category": "Other", "description": "negative"},
                {"date": "2024-01-05", "category": "Other", "description": "no amount"},
                {"date": "2024-01-06", "amount": 5.0, "category": "travel", "description": "ok too"}
            ]"#,
        )
        .unwrap();

        let outcome = repo.load(&CategorySet::default()).unwrap();
        assert_eq!(outcome.expenses.len(), 2);
        assert_eq!(outcome.expenses[1].category(), "Travel");

        let indexes: Vec<usize> = outcome.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn test_non_array_file_is_error() {
        let (_temp, repo) = repo();
        std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        std::fs::write(repo.path(), r#"{"expenses": []}"#).unwrap();

        assert!(matches!(
            repo.load(&CategorySet::default()),
            Err(TrackerError::Storage(_))
        ));
    }
}
