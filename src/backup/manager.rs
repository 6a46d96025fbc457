//! Backup manager for the expense tracker
//!
//! Snapshots the expense and budget stores into timestamped JSON archives
//! and prunes old archives by count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::file_io::{read_json, read_json_required, write_json_atomic};

/// File name prefix shared by every archive
pub const BACKUP_PREFIX: &str = "expenses_backup_";

/// Current archive layout version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Taken from the file name, not the file's mtime
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Backup archive format
///
/// Expense records are kept as raw JSON so a snapshot is faithful even when
/// the live store holds records the loader would reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub expenses: Vec<serde_json::Value>,
    #[serde(default)]
    pub budgets: serde_json::Map<String, serde_json::Value>,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: TrackerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: TrackerPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Snapshot the current stores
    ///
    /// Returns `None` without writing anything when no expense file has been
    /// saved yet.
    pub fn create_backup(&self) -> TrackerResult<Option<PathBuf>> {
        let expenses_file = self.paths.expenses_file();
        if !expenses_file.exists() {
            info!("no expense data yet, skipping backup");
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            TrackerError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}{}_{:03}.json",
            BACKUP_PREFIX,
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: now,
            expenses: read_json_required(&expenses_file)?,
            budgets: read_json(self.paths.budget_file())?,
        };

        write_json_atomic(&backup_path, &archive)?;
        info!(
            path = %backup_path.display(),
            expenses = archive.expenses.len(),
            "created backup"
        );

        Ok(Some(backup_path))
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            TrackerError::Backup(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                TrackerError::Backup(format!("Failed to read directory entry: {}", e))
            })?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(backups)
    }

    /// Delete all but the newest `keep` backups
    pub fn enforce_retention(&self) -> TrackerResult<Vec<PathBuf>> {
        let keep = self.retention.keep as usize;
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(keep) {
            fs::remove_file(&backup.path).map_err(|e| {
                TrackerError::Backup(format!("Failed to delete old backup: {}", e))
            })?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(deleted = deleted.len(), keep, "pruned old backups");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> TrackerResult<(Option<PathBuf>, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Look up a backup by file name
    pub fn get_backup(&self, filename: &str) -> TrackerResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    pub fn get_latest_backup(&self) -> TrackerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix(BACKUP_PREFIX)?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD_HHMMSS` or `YYYYMMDD_HHMMSS_mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = stamp.split('_').collect();
    let (date_part, time_part, millis) = match parts.as_slice() {
        [date, time] => (*date, *time, 0u32),
        [date, time, ms] => (*date, *time, ms.parse().ok()?),
        _ => return None,
    };

    if !stamp.is_ascii() || date_part.len() != 8 || time_part.len() != 6 || millis >= 1000 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use tempfile::TempDir;

    fn create_test_manager(keep: u32) -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let manager = BackupManager::new(paths, BackupRetention { keep });
        (manager, temp_dir)
    }

    fn seed_data(manager: &BackupManager) {
        fs::write(
            manager.paths.expenses_file(),
            r#"[{"date": "2024-01-05", "amount": 50.0, "category": "Food & Dining", "description": "Lunch"}]"#,
        )
        .unwrap();
        fs::write(manager.paths.budget_file(), r#"{"Food & Dining": 400.0}"#).unwrap();
    }

    fn pause() {
        std::thread::sleep(std::time::Duration::from_millis(15));
    }

    #[test]
    fn test_no_data_means_no_backup() {
        let (manager, _temp) = create_test_manager(5);

        assert!(manager.create_backup().unwrap().is_none());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_create_backup() {
        let (manager, _temp) = create_test_manager(5);
        seed_data(&manager);

        let backup_path = manager.create_backup().unwrap().unwrap();
        assert!(backup_path.exists());

        let name = backup_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("expenses_backup_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_backup_archive_structure() {
        let (manager, _temp) = create_test_manager(5);
        seed_data(&manager);

        let backup_path = manager.create_backup().unwrap().unwrap();
        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();

        assert_eq!(archive.schema_version, BACKUP_SCHEMA_VERSION);
        assert_eq!(archive.expenses.len(), 1);
        assert_eq!(archive.budgets["Food & Dining"], 400.0);
    }

    #[test]
    fn test_backup_without_budget_file() {
        let (manager, _temp) = create_test_manager(5);
        fs::write(manager.paths.expenses_file(), "[]").unwrap();

        let backup_path = manager.create_backup().unwrap().unwrap();
        let archive: BackupArchive =
            serde_json::from_str(&fs::read_to_string(backup_path).unwrap()).unwrap();
        assert!(archive.expenses.is_empty());
        assert!(archive.budgets.is_empty());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _temp) = create_test_manager(5);
        seed_data(&manager);

        let first = manager.create_backup().unwrap().unwrap();
        pause();
        let second = manager.create_backup().unwrap().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(backups[0].path, second);
        assert_eq!(backups[1].path, first);
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let (manager, _temp) = create_test_manager(5);
        fs::write(manager.backup_dir().join("notes.json"), "{}").unwrap();
        fs::write(manager.backup_dir().join("expenses_backup_garbage.json"), "{}").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _temp) = create_test_manager(3);
        seed_data(&manager);

        for _ in 0..5 {
            manager.create_backup().unwrap();
            pause();
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2);
        assert_eq!(manager.list_backups().unwrap().len(), 3);
    }

    #[test]
    fn test_create_backup_with_retention() {
        let (manager, _temp) = create_test_manager(2);
        seed_data(&manager);

        for _ in 0..3 {
            manager.create_backup().unwrap();
            pause();
        }

        let (new_backup, deleted) = manager.create_backup_with_retention().unwrap();
        assert!(new_backup.unwrap().exists());
        assert_eq!(deleted.len(), 2);
    }

    #[test]
    fn test_get_latest_and_by_name() {
        let (manager, _temp) = create_test_manager(5);
        assert!(manager.get_latest_backup().unwrap().is_none());

        seed_data(&manager);
        let path = manager.create_backup().unwrap().unwrap();

        let latest = manager.get_latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, path);
        assert!(manager.get_backup(&latest.filename).unwrap().is_some());
        assert!(manager.get_backup("expenses_backup_missing.json").unwrap().is_none());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20240315_143022").unwrap();
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 3);
        assert_eq!(timestamp.day(), 15);
        assert_eq!(timestamp.hour(), 14);

        let timestamp = parse_backup_timestamp("20240315_143022_456").unwrap();
        assert_eq!(timestamp.nanosecond(), 456_000_000);

        assert!(parse_backup_timestamp("20240315").is_none());
        assert!(parse_backup_timestamp("20241315_143022").is_none());
    }
}
