//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the manager and reports.
//! Every command that changes expenses or budgets saves before returning.

pub mod backup;
pub mod budget;
pub mod data;
pub mod expense;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use data::{handle_data_command, DataCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{Datelike, Local};

use crate::error::{TrackerError, TrackerResult};

/// Parse a `YYYY-MM` month, or take the current month when absent
pub(crate) fn parse_month_or_current(month: Option<&str>) -> TrackerResult<(i32, u32)> {
    match month {
        Some(text) => parse_month(text),
        None => {
            let today = Local::now().date_naive();
            Ok((today.year(), today.month()))
        }
    }
}

pub(crate) fn parse_month(text: &str) -> TrackerResult<(i32, u32)> {
    let invalid = || TrackerError::Parse(format!("Invalid month '{}'. Use YYYY-MM.", text));

    let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
