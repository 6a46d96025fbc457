//! Expense Statistics
//!
//! Count, total, mean, extremes and the highest-spend category of a snapshot.

use super::breakdown::totals_by_category;
use super::{heading, EmptyReport, ReportResult, TextReport};
use crate::models::{Expense, Money};

/// Summary statistics over a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Number of expenses
    pub count: usize,
    /// Sum of all amounts
    pub total: Money,
    /// Arithmetic mean, rounded half-to-even to the cent
    pub average: Money,
    /// Largest single amount
    pub largest: Money,
    /// Smallest single amount
    pub smallest: Money,
    /// Category with the highest total
    pub top_category: String,
    /// Total of the top category
    pub top_category_total: Money,
}

impl Statistics {
    /// Compute statistics for every expense in the snapshot
    ///
    /// When several categories share the highest total, the alphabetically
    /// first one is reported.
    pub fn generate(expenses: &[Expense]) -> ReportResult<Self> {
        let amounts: Vec<Money> = expenses.iter().map(Expense::amount).collect();
        let (Some(&largest), Some(&smallest)) = (amounts.iter().max(), amounts.iter().min())
        else {
            return ReportResult::Empty(EmptyReport::NoExpenses);
        };

        let total: Money = amounts.iter().sum();

        let mut top: Option<(String, Money)> = None;
        for (category, amount) in totals_by_category(expenses) {
            match &top {
                Some((_, best)) if amount <= *best => {}
                _ => top = Some((category, amount)),
            }
        }
        let Some((top_category, top_category_total)) = top else {
            return ReportResult::Empty(EmptyReport::NoExpenses);
        };

        ReportResult::Ready(Self {
            count: amounts.len(),
            total,
            average: total.divide_rounded(amounts.len()),
            largest,
            smallest,
            top_category,
            top_category_total,
        })
    }
}

impl TextReport for Statistics {
    fn format_terminal_with(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);

        let mut output = heading("EXPENSE STATISTICS");
        output.push_str(&format!("Total Expenses: {}\n", self.count));
        output.push_str(&format!("Total Amount: {}\n", money(self.total)));
        output.push_str(&format!("Average Expense: {}\n", money(self.average)));
        output.push_str(&format!("Largest Expense: {}\n", money(self.largest)));
        output.push_str(&format!("Smallest Expense: {}\n", money(self.smallest)));
        output.push_str(&format!(
            "Top Category: {} ({})\n",
            self.top_category,
            money(self.top_category_total)
        ));
        output
    }
}
