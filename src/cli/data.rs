//! CSV export and import commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::export::{export_csv_file, import_csv_file};
use crate::services::ExpenseManager;
use crate::storage::Storage;

/// Data exchange subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Write all expenses to a CSV file
    Export {
        /// Output file; `.csv` is appended when missing
        #[arg(default_value = "expenses.csv")]
        file: PathBuf,
    },

    /// Add expenses from a CSV file with a Date,Amount,Category,Description header
    Import {
        /// CSV file to read
        file: PathBuf,
    },
}

/// Handle an export or import command
pub fn handle_data_command(
    storage: &Storage,
    settings: &Settings,
    manager: &mut ExpenseManager,
    cmd: DataCommands,
) -> TrackerResult<()> {
    match cmd {
        DataCommands::Export { file } => {
            let file = with_csv_extension(file);
            let count = export_csv_file(manager.expenses(), &file)?;
            println!("Exported {} expenses to {}", count, file.display());
        }

        DataCommands::Import { file } => {
            let result = import_csv_file(&file, &settings.category_set())?;

            for failure in &result.failures {
                eprintln!("Skipping row {}: {}", failure.row, failure.reason);
            }

            let imported = result.imported();
            if imported > 0 {
                manager.extend(result.expenses);
                storage.save_manager(manager)?;
            }

            println!("Imported {} expenses from {}", imported, file.display());
            if !result.failures.is_empty() {
                println!("Skipped {} invalid rows", result.failures.len());
            }
        }
    }

    Ok(())
}

fn with_csv_extension(file: PathBuf) -> PathBuf {
    let has_csv = file
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if has_csv {
        file
    } else {
        let mut name = file.into_os_string();
        name.push(".csv");
        PathBuf::from(name)
    }
}
