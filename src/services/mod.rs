//! Business logic layer for the expense tracker
//!
//! The manager owns the expense collection and budgets; budget evaluation
//! is a pure function over a month's expenses.

pub mod budget;
pub mod manager;

pub use budget::BudgetStatus;
pub use manager::ExpenseManager;
