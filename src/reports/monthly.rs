//! Monthly Report
//!
//! Totals for one calendar month, a category breakdown and a sample of the
//! month's expenses in the order they were given.

use chrono::Datelike;

use super::breakdown::CategoryTotals;
use super::{format_category_lines, heading, EmptyReport, ReportResult, TextReport};
use crate::models::Expense;

/// Default number of expenses listed under "Recent Expenses"
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Report for a single month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    /// Category subtotals and the month's total
    pub totals: CategoryTotals,
    /// Leading expenses of the month, in snapshot order
    pub recent: Vec<Expense>,
}

impl MonthlyReport {
    /// Generate the report for `year`-`month`
    ///
    /// The recent sample keeps the snapshot's ordering; it is not re-sorted.
    pub fn generate(
        expenses: &[Expense],
        year: i32,
        month: u32,
        recent_limit: usize,
    ) -> ReportResult<Self> {
        let in_month: Vec<&Expense> = expenses
            .iter()
            .filter(|e| e.date().year() == year && e.date().month() == month)
            .collect();

        if in_month.is_empty() {
            return ReportResult::Empty(EmptyReport::NoExpensesForMonth);
        }

        ReportResult::Ready(Self {
            year,
            month,
            totals: CategoryTotals::from_expenses(in_month.iter().copied()),
            recent: in_month
                .into_iter()
                .take(recent_limit)
                .cloned()
                .collect(),
        })
    }
}

impl TextReport for MonthlyReport {
    fn format_terminal_with(&self, symbol: &str) -> String {
        let mut output = heading(&format!(
            "MONTHLY REPORT - {}-{:02}",
            self.year, self.month
        ));
        output.push_str(&format!(
            "Total Expenses: {}\n\n",
            self.totals.total.format_with_symbol(symbol)
        ));
        output.push_str(&format_category_lines(&self.totals.lines, symbol));

        output.push_str("\nRecent Expenses:\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for exp in &self.recent {
            output.push_str(&exp.format_line(symbol));
            output.push('\n');
        }

        output
    }
}
