//! Backup restoration for the expense tracker
//!
//! Handles checking and restoring data from backup archives.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::CategorySet;
use crate::storage::budget::amounts_to_money;
use crate::storage::expenses::records_to_expenses;
use crate::storage::file_io::{read_json_required, stage_json};

use super::manager::BackupArchive;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: TrackerPaths,
}

impl RestoreManager {
    pub fn new(paths: TrackerPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file
    ///
    /// The archive is validated first; an archive whose budgets cannot be
    /// read is refused and nothing is overwritten. Expense records the loader
    /// would reject are still written back and counted in the result.
    ///
    /// Both data files are fully written to temp files before either is
    /// renamed into place. Only a failure between the two renames can leave
    /// the restored expenses next to the old budgets.
    pub fn restore_from_file(
        &self,
        backup_path: &Path,
        categories: &CategorySet,
    ) -> TrackerResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        self.restore_from_archive(&archive, categories)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(
        &self,
        archive: &BackupArchive,
        categories: &CategorySet,
    ) -> TrackerResult<RestoreResult> {
        let check = validate_archive(archive, categories);
        if !check.is_valid {
            return Err(TrackerError::Backup(format!(
                "Refusing to restore: {}",
                check.problems.join("; ")
            )));
        }

        self.paths.ensure_directories()?;
        let expenses = stage_json(self.paths.expenses_file(), &archive.expenses)?;
        let budgets = stage_json(self.paths.budget_file(), &archive.budgets)?;
        expenses.commit()?;
        budgets.commit()?;

        if check.invalid_records > 0 {
            warn!(
                invalid = check.invalid_records,
                "restored backup contains records that will be skipped on load"
            );
        }
        info!(
            expenses = check.expense_count,
            budgets = check.budget_count,
            "restored backup"
        );

        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            expenses_restored: check.expense_count,
            invalid_records: check.invalid_records,
            budgets_restored: check.budget_count,
        })
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(
        &self,
        backup_path: &Path,
        categories: &CategorySet,
    ) -> TrackerResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        Ok(validate_archive(&archive, categories))
    }
}

fn read_archive(backup_path: &Path) -> TrackerResult<BackupArchive> {
    read_json_required(backup_path).map_err(|e| {
        TrackerError::Backup(format!(
            "Failed to read backup {}: {}",
            backup_path.display(),
            e
        ))
    })
}

fn validate_archive(archive: &BackupArchive, categories: &CategorySet) -> ValidationResult {
    let mut problems = Vec::new();

    let outcome = records_to_expenses(archive.expenses.clone(), categories);

    let budget_count = match serde_json::from_value(serde_json::Value::Object(
        archive.budgets.clone(),
    ))
    .map_err(|e| TrackerError::Json(e.to_string()))
    .and_then(amounts_to_money)
    {
        Ok(budgets) => budgets.len(),
        Err(e) => {
            problems.push(format!("budgets unreadable: {}", e));
            0
        }
    };

    if archive.schema_version > super::manager::BACKUP_SCHEMA_VERSION {
        problems.push(format!(
            "archive schema v{} is newer than supported v{}",
            archive.schema_version,
            super::manager::BACKUP_SCHEMA_VERSION
        ));
    }

    ValidationResult {
        is_valid: problems.is_empty(),
        schema_version: archive.schema_version,
        backup_date: archive.created_at,
        expense_count: outcome.expenses.len(),
        invalid_records: outcome.rejected.len(),
        budget_count,
        problems,
    }
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    /// Valid expenses now in the store
    pub expenses_restored: usize,
    /// Records written back that will be skipped on load
    pub invalid_records: usize,
    pub budgets_restored: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Restored {} expenses and {} budgets from backup of {}",
            self.expenses_restored,
            self.budgets_restored,
            self.backup_date.format("%Y-%m-%d %H:%M:%S")
        );
        if self.invalid_records > 0 {
            summary.push_str(&format!(" ({} invalid records)", self.invalid_records));
        }
        summary
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    /// False if the archive cannot be restored as-is
    pub is_valid: bool,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub expense_count: usize,
    /// Expense records that fail validation
    pub invalid_records: usize,
    pub budget_count: usize,
    pub problems: Vec<String>,
}

impl ValidationResult {
    /// Valid and without any rejected expense records
    pub fn is_clean(&self) -> bool {
        self.is_valid && self.invalid_records == 0
    }

    pub fn summary(&self) -> String {
        if !self.is_valid {
            format!(
                "Invalid backup (v{}): {}",
                self.schema_version,
                self.problems.join("; ")
            )
        } else if self.invalid_records > 0 {
            format!(
                "Backup (v{}): {} expenses, {} budgets, {} invalid records",
                self.schema_version, self.expense_count, self.budget_count, self.invalid_records
            )
        } else {
            format!(
                "Complete backup (v{}): {} expenses, {} budgets",
                self.schema_version, self.expense_count, self.budget_count
            )
        }
    }
}
