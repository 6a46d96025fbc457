//! Display formatting for terminal output
//!
//! Tables for expense lists and budget status. Reports render themselves;
//! see `crate::reports::TextReport`.

pub mod budget;
pub mod expense;

pub use budget::{format_budget_line, format_budget_status};
pub use expense::{format_expense_list, format_expense_row, format_expense_table, format_matches};

/// A horizontal rule of `width` dashes, newline-terminated
pub(crate) fn rule(width: usize) -> String {
    format!("{}\n", "-".repeat(width))
}
