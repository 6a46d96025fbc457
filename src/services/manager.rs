//! Expense manager
//!
//! Owns the in-memory expense collection and the budget map. The collection
//! is kept sorted by date, newest first, after every insertion.
//!
//! The manager has no internal locking; callers sharing one across threads
//! must wrap it in their own mutex.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::budget::{self, BudgetStatus};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Expense, Money};

/// Holds expenses (date descending) and monthly budgets by category
#[derive(Debug, Clone, Default)]
pub struct ExpenseManager {
    expenses: Vec<Expense>,
    budgets: BTreeMap<String, Money>,
}

impl ExpenseManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager from existing expenses and budgets
    pub fn with_data(expenses: Vec<Expense>, budgets: BTreeMap<String, Money>) -> Self {
        let mut manager = Self { expenses, budgets };
        manager.sort();
        manager
    }

    /// All expenses, newest first
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Expense at a position of the current (sorted) collection
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    /// Add an expense and restore date-descending order
    ///
    /// Identical expenses are kept side by side; there is no deduplication.
    pub fn add(&mut self, expense: Expense) {
        debug!(date = %expense.date(), category = expense.category(), "adding expense");
        self.expenses.push(expense);
        self.sort();
    }

    /// Add many expenses at once, sorting only once
    pub fn extend(&mut self, expenses: impl IntoIterator<Item = Expense>) {
        let before = self.expenses.len();
        self.expenses.extend(expenses);
        debug!(added = self.expenses.len() - before, "adding expenses in bulk");
        self.sort();
    }

    /// Remove and return the expense at `index` of the sorted collection
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] and leaves the collection
    /// untouched when `index` is not in `0..len`.
    pub fn remove(&mut self, index: usize) -> TrackerResult<Expense> {
        if index >= self.expenses.len() {
            return Err(TrackerError::IndexOutOfRange {
                index,
                len: self.expenses.len(),
            });
        }

        let removed = self.expenses.remove(index);
        debug!(index, "removed expense");
        Ok(removed)
    }

    /// Case-insensitive substring search over description and category
    ///
    /// An empty query matches every expense.
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let query = query.to_lowercase();
        self.expenses
            .iter()
            .filter(|e| {
                e.description().to_lowercase().contains(&query)
                    || e.category().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Expenses whose category equals `category` exactly
    pub fn filter_by_category(&self, category: &str) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.category() == category)
            .collect()
    }

    /// Expenses dated between `start` and `end` (both `YYYY-MM-DD`, inclusive)
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Parse`] when either bound is not a valid date.
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> TrackerResult<Vec<&Expense>> {
        let start = parse_date(start).map_err(|e| TrackerError::Parse(e.to_string()))?;
        let end = parse_date(end).map_err(|e| TrackerError::Parse(e.to_string()))?;
        Ok(self.in_date_range(start, end))
    }

    /// Expenses dated between two dates, inclusive
    pub fn in_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.date() >= start && e.date() <= end)
            .collect()
    }

    /// Expenses in a calendar month
    pub fn monthly_expenses(&self, year: i32, month: u32) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.date().year() == year && e.date().month() == month)
            .collect()
    }

    /// Set the monthly budget for a category, replacing any previous value
    ///
    /// The category is stored as given: it is not checked against the
    /// category set here. The application shell does that check.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: Money) {
        let category = category.into();
        debug!(category = %category, amount = %amount, "setting budget");
        self.budgets.insert(category, amount);
    }

    /// All budgets by category name
    pub fn budgets(&self) -> &BTreeMap<String, Money> {
        &self.budgets
    }

    pub fn budget_for(&self, category: &str) -> Option<Money> {
        self.budgets.get(category).copied()
    }

    /// Budget position of every budgeted category for a month
    pub fn budget_status(&self, year: i32, month: u32) -> Vec<BudgetStatus> {
        budget::evaluate(&self.budgets, self.monthly_expenses(year, month))
    }

    fn sort(&mut self) {
        // Stable sort, so equal dates keep insertion order
        self.expenses.sort_by(|a, b| b.date().cmp(&a.date()));
    }
}
