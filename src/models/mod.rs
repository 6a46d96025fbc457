//! Core data models for the expense tracker
//!
//! This module contains the value types of the domain: amounts, the
//! category set and validated expenses.

pub mod category;
pub mod expense;
pub mod money;

pub use category::{CategorySet, DEFAULT_CATEGORIES};
pub use expense::{parse_date, AmountInput, Expense, ExpenseRecord, DATE_FORMAT};
pub use money::{Money, MoneyParseError, DEFAULT_CURRENCY_SYMBOL};
