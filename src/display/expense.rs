//! Expense list formatting
//!
//! Tables for `list`, `search` and `filter` output.

use crate::models::{Expense, DATE_FORMAT};

use super::rule;

const TABLE_WIDTH: usize = 80;

/// Format a single expense row; `number` is the 1-based position when shown
pub fn format_expense_row(expense: &Expense, number: Option<usize>, symbol: &str) -> String {
    let number = number.map(|n| format!("{:<3} ", n)).unwrap_or_default();
    format!(
        "{}{:<12} {:<10} {:<20} {}",
        number,
        expense.date().format(DATE_FORMAT),
        expense.amount().format_with_symbol(symbol),
        expense.category(),
        expense.description()
    )
    .trim_end()
    .to_string()
}

/// Format expenses as a table
///
/// With `numbered`, rows carry their 1-based position, which is what
/// `expense remove` expects.
pub fn format_expense_table(expenses: &[&Expense], numbered: bool, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&rule(TABLE_WIDTH));
    if numbered {
        output.push_str(&format!("{:<3} ", "#"));
    }
    output.push_str(&format!(
        "{:<12} {:<10} {:<20} {}\n",
        "Date", "Amount", "Category", "Description"
    ));
    output.push_str(&rule(TABLE_WIDTH));

    for (i, expense) in expenses.iter().enumerate() {
        let number = numbered.then_some(i + 1);
        output.push_str(&format_expense_row(expense, number, symbol));
        output.push('\n');
    }

    output
}

/// Full listing with a count line, or a notice when there is nothing to show
pub fn format_expense_list(expenses: &[&Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    format!(
        "Total expenses: {}\n\n{}",
        expenses.len(),
        format_expense_table(expenses, true, symbol)
    )
}

/// Matches for a search or filter, unnumbered
pub fn format_matches(expenses: &[&Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found matching your search.\n".to_string();
    }

    format!(
        "Found {} matching expenses:\n\n{}",
        expenses.len(),
        format_expense_table(expenses, false, symbol)
    )
}
