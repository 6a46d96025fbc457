//! Category Breakdown Report
//!
//! Totals and percentage share per category, over the whole snapshot.

use std::collections::BTreeMap;

use super::{format_category_lines, heading, EmptyReport, ReportResult, TextReport};
use crate::models::{Expense, Money};

/// One category's share of a total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    /// Category name
    pub category: String,
    /// Sum of the category's expenses
    pub amount: Money,
    /// Percentage of the overall total; zero when the total is zero
    pub percentage: f64,
}

/// Per-category subtotals plus the grand total
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotals {
    /// Grand total
    pub total: Money,
    /// Lines in category-name order
    pub lines: Vec<CategoryLine>,
}

impl CategoryTotals {
    /// Aggregate expenses by category
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let by_category = totals_by_category(expenses);
        let total: Money = by_category.values().sum();

        let lines = by_category
            .into_iter()
            .map(|(category, amount)| CategoryLine {
                percentage: amount.percent_of(total),
                category,
                amount,
            })
            .collect();

        Self { total, lines }
    }

}

/// Sum expenses per category, keyed by name so iteration is alphabetical
pub fn totals_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for exp in expenses {
        *totals.entry(exp.category().to_string()).or_default() += exp.amount();
    }
    totals
}

/// Overall category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub totals: CategoryTotals,
}

impl CategoryBreakdown {
    /// Generate the breakdown for every expense in the snapshot
    pub fn generate(expenses: &[Expense]) -> ReportResult<Self> {
        if expenses.is_empty() {
            return ReportResult::Empty(EmptyReport::NoExpenses);
        }

        ReportResult::Ready(Self {
            totals: CategoryTotals::from_expenses(expenses),
        })
    }
}

impl TextReport for CategoryBreakdown {
    fn format_terminal_with(&self, symbol: &str) -> String {
        let mut output = heading("OVERALL CATEGORY BREAKDOWN");
        output.push_str(&format!(
            "Total Expenses: {}\n\n",
            self.totals.total.format_with_symbol(symbol)
        ));
        output.push_str(&format_category_lines(&self.totals.lines, symbol));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySet;

    fn expense(date: &str, amount: &str, category: &str) -> Expense {
        Expense::parse(date, amount, category, "", &CategorySet::default()).unwrap()
    }

    #[test]
    fn test_totals_are_alphabetical() {
        let expenses = vec![
            expense("2024-01-01", "10", "Travel"),
            expense("2024-01-02", "5", "Bills & Utilities"),
            expense("2024-01-03", "5", "Travel"),
        ];
        let totals = CategoryTotals::from_expenses(&expenses);

        assert_eq!(totals.total, Money::from_cents(2000));
        assert_eq!(totals.lines[0].category, "Bills & Utilities");
        assert_eq!(totals.lines[0].percentage, 25.0);
        assert_eq!(totals.lines[1].category, "Travel");
        assert_eq!(totals.lines[1].amount, Money::from_cents(1500));
        assert_eq!(totals.lines[1].percentage, 75.0);
    }

    #[test]
    fn test_breakdown_of_empty_snapshot() {
        let result = CategoryBreakdown::generate(&[]);
        assert_eq!(result.as_empty(), Some(&EmptyReport::NoExpenses));
        assert_eq!(result.format_terminal(), "No expenses to analyze.");
    }

    #[test]
    fn test_breakdown_rendering() {
        let expenses = vec![
            expense("2024-01-05", "50", "Food & Dining"),
            expense("2024-01-10", "30", "Transportation"),
            expense("2024-02-01", "20", "Food & Dining"),
        ];
        let text = CategoryBreakdown::generate(&expenses).format_terminal();

        assert!(text.contains("OVERALL CATEGORY BREAKDOWN"));
        assert!(text.contains("Total Expenses: $100.00"));
        assert!(text.contains("Food & Dining        $   70.00 ( 70.0%)"));
        assert!(text.contains("Transportation       $   30.00 ( 30.0%)"));
    }
}
