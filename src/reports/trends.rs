//! Expense Trends Report
//!
//! Monthly totals over a trailing window. The window length counts every
//! month as 30 days, so `months = 6` looks back exactly 180 days from the
//! reference date, whatever the calendar says.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

use super::{heading, EmptyReport, ReportResult, TextReport};
use crate::models::{Expense, Money};

/// Days counted per month when sizing the window
pub const DAYS_PER_MONTH: u64 = 30;

/// Default number of months looked back
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Trend of monthly totals
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    /// Requested number of months
    pub months: u32,
    /// First day of the window (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive)
    pub end_date: NaiveDate,
    /// `YYYY-MM` buckets in ascending order with their totals
    pub buckets: Vec<(String, Money)>,
}

impl TrendReport {
    /// Generate the trend for the `months * 30` days ending on `today`
    pub fn generate(expenses: &[Expense], months: u32, today: NaiveDate) -> ReportResult<Self> {
        if expenses.is_empty() {
            return ReportResult::Empty(EmptyReport::NoExpenses);
        }

        let start_date = today
            .checked_sub_days(Days::new(u64::from(months) * DAYS_PER_MONTH))
            .unwrap_or(NaiveDate::MIN);

        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for exp in expenses
            .iter()
            .filter(|e| e.date() >= start_date && e.date() <= today)
        {
            let key = format!("{:04}-{:02}", exp.date().year(), exp.date().month());
            *totals.entry(key).or_default() += exp.amount();
        }

        if totals.is_empty() {
            return ReportResult::Empty(EmptyReport::NoExpensesInPeriod);
        }

        ReportResult::Ready(Self {
            months,
            start_date,
            end_date: today,
            buckets: totals.into_iter().collect(),
        })
    }
}

impl TextReport for TrendReport {
    fn format_terminal_with(&self, symbol: &str) -> String {
        let mut output = heading(&format!("EXPENSE TRENDS - Last {} Months", self.months));
        for (month, total) in &self.buckets {
            output.push_str(&format!("{}: {}\n", month, total.format_with_symbol(symbol)));
        }
        output
    }
}
