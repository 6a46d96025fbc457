//! Backup system for the expense tracker
//!
//! # Architecture
//!
//! - `BackupManager`: snapshots the stores and prunes old archives
//! - `RestoreManager`: validates and restores archives
//!
//! # Backup Format
//!
//! Each backup is `backups/expenses_backup_YYYYMMDD_HHMMSS_mmm.json`:
//! - `schema_version`: version for migration support
//! - `created_at`: UTC timestamp of the snapshot
//! - `expenses`: the expense records, as stored
//! - `budgets`: the `{category: amount}` budget map
//!
//! # Retention Policy
//!
//! Only the newest `backup_retention.keep` archives (default 20) are kept
//! when retention is enforced.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::backup::{BackupManager, RestoreManager};
//! use expense_tracker::config::{BackupRetention, TrackerPaths};
//!
//! let paths = TrackerPaths::new()?;
//! let backup_manager = BackupManager::new(paths.clone(), BackupRetention::default());
//!
//! if let Some(backup_path) = backup_manager.create_backup()? {
//!     backup_manager.enforce_retention()?;
//!
//!     let restore_manager = RestoreManager::new(paths);
//!     let result = restore_manager.restore_from_file(&backup_path, &categories)?;
//!     println!("{}", result.summary());
//! }
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_PREFIX, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
