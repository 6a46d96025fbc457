//! Budget status formatting

use crate::services::BudgetStatus;

use super::rule;

/// Format one month's budget status as a table
pub fn format_budget_status(statuses: &[BudgetStatus], year: i32, month: u32, symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = format!("Budget Status for {}-{:02}\n", year, month);
    output.push_str(&rule(68));
    output.push_str(&format!(
        "{:<20} {:>11} {:>11} {:>11} {:>8}\n",
        "Category", "Budget", "Spent", "Remaining", "Used"
    ));
    output.push_str(&rule(68));

    for status in statuses {
        output.push_str(&format!(
            "{:<20} {:>11} {:>11} {:>11} {:>7.1}%",
            status.category,
            status.budget.format_with_symbol(symbol),
            status.spent.format_with_symbol(symbol),
            status.remaining.format_with_symbol(symbol),
            status.percentage
        ));
        if status.is_over_budget() {
            output.push_str("  OVER");
        }
        output.push('\n');
    }

    output
}

/// One-line status shown after a budget is set
pub fn format_budget_line(status: &BudgetStatus, symbol: &str) -> String {
    format!(
        "Current month status: {} spent, {} remaining ({:.1}%)",
        status.spent.format_with_symbol(symbol),
        status.remaining.format_with_symbol(symbol),
        status.percentage
    )
}
