//! Expense Tracker - personal expense tracking with budgets and reports
//!
//! This library records validated expenses, evaluates per-category monthly
//! budgets, and produces text reports. The `expense` binary is a thin clap
//! shell over it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Value types (money, categories, expenses)
//! - `services`: The expense manager and budget evaluation
//! - `reports`: Monthly, category, trend, statistics and chart reports
//! - `storage`: JSON file storage with atomic writes
//! - `export`: CSV export and import
//! - `backup`: Backup snapshots, retention and restore
//! - `config`: Path resolution and user settings
//! - `cli` / `display`: Command handlers and terminal formatting
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::models::{CategorySet, Expense};
//! use expense_tracker::reports::{Reports, TextReport};
//! use expense_tracker::services::ExpenseManager;
//!
//! let categories = CategorySet::default();
//! let mut manager = ExpenseManager::new();
//! manager.add(Expense::parse("2024-01-05", "50", "Food & Dining", "Lunch", &categories)?);
//!
//! let reports = Reports::new(manager.expenses());
//! println!("{}", reports.monthly_report(2024, 1).format_terminal());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult, ValidationError};
