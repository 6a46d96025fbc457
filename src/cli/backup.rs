//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Snapshot expenses and budgets
    Create,

    /// List available backups, newest first
    List {
        /// Show size and creation time of each backup
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replace current data with a backup
    Restore {
        /// Number from `backup list`, file name, path, or "latest"
        backup: String,

        /// Skip the confirmation step
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &TrackerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> TrackerResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => match manager.create_backup_with_retention()? {
            (Some(backup_path), deleted) => {
                println!("Backup created: {}", backup_path.display());
                if !deleted.is_empty() {
                    println!("Removed {} old backup(s).", deleted.len());
                }
            }
            (None, _) => println!("No data to backup."),
        },

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                return Ok(());
            }

            println!("Available backups:");
            for (i, backup) in backups.iter().enumerate() {
                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                    );
                } else {
                    println!(
                        "{}. {} ({} ago)",
                        i + 1,
                        backup.filename,
                        format_age(backup)
                    );
                }
            }
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let categories = settings.category_set();

            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&backup_path, &categories)?;

            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Status: {}", validation.summary());

            if !validation.is_valid {
                return Err(TrackerError::Backup(format!(
                    "Backup cannot be restored: {}",
                    validation.problems.join("; ")
                )));
            }

            if !force {
                println!();
                println!("This will overwrite all current expenses and budgets.");
                println!("To proceed, run again with --force.");
                return Ok(());
            }

            if let Some(safety) = manager.create_backup()? {
                println!("Current data saved to: {}", safety.display());
            }

            let result = restore_manager.restore_from_file(&backup_path, &categories)?;
            println!("Data restored successfully.");
            println!("{}", result.summary());
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> TrackerResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| TrackerError::backup_not_found("latest"));
    }

    // Position in `backup list`
    if let Ok(number) = backup.parse::<usize>() {
        let backups = manager.list_backups()?;
        return number
            .checked_sub(1)
            .and_then(|i| backups.into_iter().nth(i))
            .map(|b| b.path)
            .ok_or_else(|| TrackerError::backup_not_found(backup));
    }

    if let Some(info) = manager.get_backup(backup)? {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    Err(TrackerError::backup_not_found(backup))
}

fn format_age(backup: &BackupInfo) -> String {
    let total_seconds = Utc::now()
        .signed_duration_since(backup.created_at)
        .num_seconds()
        .max(0);

    let minutes = total_seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if total_seconds < 60 {
        format!("{}s", total_seconds)
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if hours < 24 {
        format!("{}h", hours)
    } else {
        format!("{}d", days)
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
