//! Reports module for the expense tracker
//!
//! Reports are read-only views over a snapshot of expenses. Each report is a
//! data structure with a `format_terminal_with` rendering; when there is nothing
//! to aggregate a report yields an [`EmptyReport`] sentinel instead of an
//! error.

pub mod breakdown;
pub mod monthly;
pub mod statistics;
pub mod trends;
pub mod visualization;

pub use breakdown::{CategoryBreakdown, CategoryLine, CategoryTotals};
pub use monthly::{MonthlyReport, DEFAULT_RECENT_LIMIT};
pub use statistics::Statistics;
pub use trends::{TrendReport, DAYS_PER_MONTH, DEFAULT_TREND_MONTHS};
pub use visualization::{Bar, Visualization, DEFAULT_BAR_WIDTH};

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDate};

use crate::models::{Expense, Money, DEFAULT_CURRENCY_SYMBOL};

/// Reasons a report has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReport {
    /// The requested month has no expenses
    NoExpensesForMonth,
    /// The snapshot itself is empty
    NoExpenses,
    /// Expenses exist, but none fall in the trend window
    NoExpensesInPeriod,
    /// No category totals were given to chart
    NoData,
}

impl EmptyReport {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoExpensesForMonth => "No expenses found for this month.",
            Self::NoExpenses => "No expenses to analyze.",
            Self::NoExpensesInPeriod => "No expenses in the selected period.",
            Self::NoData => "No data to visualize.",
        }
    }
}

impl fmt::Display for EmptyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Reports that render as terminal text
pub trait TextReport {
    /// Render with amounts prefixed by `symbol`
    fn format_terminal_with(&self, symbol: &str) -> String;

    fn format_terminal(&self) -> String {
        self.format_terminal_with(DEFAULT_CURRENCY_SYMBOL)
    }
}

/// Either a generated report or the reason there is none
#[derive(Debug, Clone, PartialEq)]
pub enum ReportResult<T> {
    Empty(EmptyReport),
    Ready(T),
}

impl<T> ReportResult<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(report) => Some(report),
            Self::Empty(_) => None,
        }
    }

    pub fn as_empty(&self) -> Option<&EmptyReport> {
        match self {
            Self::Empty(reason) => Some(reason),
            Self::Ready(_) => None,
        }
    }
}

impl<T: TextReport> TextReport for ReportResult<T> {
    fn format_terminal_with(&self, symbol: &str) -> String {
        match self {
            Self::Ready(report) => report.format_terminal_with(symbol),
            Self::Empty(reason) => reason.message().to_string(),
        }
    }
}

/// Report generator over an immutable snapshot of expenses
///
/// The snapshot's order is respected wherever a report lists expenses.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    expenses: &'a [Expense],
}

impl<'a> Reports<'a> {
    pub fn new(expenses: &'a [Expense]) -> Self {
        Self { expenses }
    }

    /// Monthly report listing up to ten expenses as the recent sample
    pub fn monthly_report(&self, year: i32, month: u32) -> ReportResult<MonthlyReport> {
        self.monthly_report_with_limit(year, month, DEFAULT_RECENT_LIMIT)
    }

    pub fn monthly_report_with_limit(
        &self,
        year: i32,
        month: u32,
        recent_limit: usize,
    ) -> ReportResult<MonthlyReport> {
        MonthlyReport::generate(self.expenses, year, month, recent_limit)
    }

    pub fn category_breakdown(&self) -> ReportResult<CategoryBreakdown> {
        CategoryBreakdown::generate(self.expenses)
    }

    /// Trend over the last `months` (30-day) months, ending today
    pub fn expense_trends(&self, months: u32) -> ReportResult<TrendReport> {
        self.expense_trends_as_of(months, Local::now().date_naive())
    }

    pub fn expense_trends_as_of(&self, months: u32, today: NaiveDate) -> ReportResult<TrendReport> {
        TrendReport::generate(self.expenses, months, today)
    }

    pub fn statistics(&self) -> ReportResult<Statistics> {
        Statistics::generate(self.expenses)
    }

    /// Totals per category over the whole snapshot
    pub fn category_totals(&self) -> BTreeMap<String, Money> {
        breakdown::totals_by_category(self.expenses)
    }

    /// Bar chart of the given totals with the default width
    pub fn visualize(&self, totals: &BTreeMap<String, Money>) -> ReportResult<Visualization> {
        Visualization::generate(totals, DEFAULT_BAR_WIDTH)
    }
}

/// Title block shared by the text reports
pub(crate) fn heading(title: &str) -> String {
    let rule = "=".repeat(50);
    format!("{rule}\n{title}\n{rule}\n\n")
}

/// "Category Breakdown" table shared by the monthly and overall reports
pub(crate) fn format_category_lines(lines: &[CategoryLine], symbol: &str) -> String {
    let mut output = String::from("Category Breakdown:\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');

    for line in lines {
        output.push_str(&format!(
            "{:<20} {}{:>8} ({:>5.1}%)\n",
            line.category,
            symbol,
            line.amount.format_plain(),
            line.percentage
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySet;

    #[test]
    fn test_every_report_has_a_sentinel_for_empty_snapshot() {
        let reports = Reports::new(&[]);

        assert_eq!(
            reports.monthly_report(2024, 1).as_empty(),
            Some(&EmptyReport::NoExpensesForMonth)
        );
        assert_eq!(
            reports.category_breakdown().as_empty(),
            Some(&EmptyReport::NoExpenses)
        );
        assert_eq!(
            reports.expense_trends(DEFAULT_TREND_MONTHS).as_empty(),
            Some(&EmptyReport::NoExpenses)
        );
        assert_eq!(reports.statistics().as_empty(), Some(&EmptyReport::NoExpenses));
        assert_eq!(
            reports.visualize(&reports.category_totals()).as_empty(),
            Some(&EmptyReport::NoData)
        );
    }

    #[test]
    fn test_reports_do_not_touch_snapshot() {
        let categories = CategorySet::default();
        let expenses = vec![
            Expense::parse("2024-01-05", "50", "Food & Dining", "", &categories).unwrap(),
            Expense::parse("2024-01-10", "30", "Transportation", "", &categories).unwrap(),
        ];
        let before = expenses.clone();

        let reports = Reports::new(&expenses);
        let _ = reports.monthly_report(2024, 1);
        let _ = reports.statistics();
        let _ = reports.category_breakdown();

        assert_eq!(expenses, before);
    }

    #[test]
    fn test_category_totals_feed_visualization() {
        let categories = CategorySet::default();
        let expenses = vec![
            Expense::parse("2024-01-05", "50", "Food & Dining", "", &categories).unwrap(),
            Expense::parse("2024-01-10", "25", "Travel", "", &categories).unwrap(),
        ];
        let reports = Reports::new(&expenses);

        let viz = reports
            .visualize(&reports.category_totals())
            .into_ready()
            .unwrap();
        assert_eq!(viz.bars[0].length, 40);
        assert_eq!(viz.bars[1].length, 20);
    }

    #[test]
    fn test_reports_use_given_symbol() {
        let categories = CategorySet::default();
        let expenses = vec![
            Expense::parse("2024-01-05", "50", "Food & Dining", "Lunch", &categories).unwrap(),
            Expense::parse("2024-01-10", "30", "Transportation", "Taxi", &categories).unwrap(),
        ];
        let reports = Reports::new(&expenses);
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let rendered = [
            reports.monthly_report(2024, 1).format_terminal_with("€"),
            reports.category_breakdown().format_terminal_with("€"),
            reports.expense_trends_as_of(1, today).format_terminal_with("€"),
            reports.statistics().format_terminal_with("€"),
            reports
                .visualize(&reports.category_totals())
                .format_terminal_with("€"),
        ];

        for text in &rendered {
            assert!(text.contains('€'), "missing symbol in:\n{}", text);
            assert!(!text.contains('$'), "default symbol leaked into:\n{}", text);
        }
        assert!(rendered[0].contains("2024-01-10 | €30.00 | Transportation | Taxi"));
    }

    #[test]
    fn test_empty_sentinel_ignores_symbol() {
        let reports = Reports::new(&[]);
        assert_eq!(
            reports.statistics().format_terminal_with("€"),
            "No expenses to analyze."
        );
    }

    #[test]
    fn test_heading() {
        let h = heading("TITLE");
        assert!(h.starts_with(&"=".repeat(50)));
        assert!(h.contains("\nTITLE\n"));
        assert!(h.ends_with("\n\n"));
    }
}
