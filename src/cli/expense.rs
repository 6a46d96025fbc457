//! Expense CLI commands
//!
//! Add, list, remove, search and filter expenses.

use chrono::Local;
use clap::Subcommand;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_matches};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, DATE_FORMAT};
use crate::services::ExpenseManager;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name (case-insensitive)
        category: String,
        /// Free-text description
        #[arg(default_value = "")]
        description: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List all expenses, newest first
    #[command(alias = "ls")]
    List,

    /// Remove an expense by its number in `list`
    #[command(alias = "rm")]
    Remove {
        /// Expense number as shown by `list` (starting at 1)
        number: usize,
    },

    /// Search descriptions and categories (case-insensitive)
    Search {
        /// Text to look for
        query: String,
    },

    /// Show expenses in one category or a date range
    Filter {
        /// Category name (case-insensitive)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        category: Option<String>,
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    manager: &mut ExpenseManager,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date =
                date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());
            let expense = Expense::parse(
                &date,
                amount.trim(),
                &category,
                &description,
                &settings.category_set(),
            )?;

            println!("Expense added: {}", expense.format_line(symbol));
            manager.add(expense);
            storage.save_manager(manager)?;
        }

        ExpenseCommands::List => {
            let all: Vec<&Expense> = manager.expenses().iter().collect();
            print!("{}", format_expense_list(&all, symbol));
        }

        ExpenseCommands::Remove { number } => {
            let len = manager.len();
            if number == 0 || number > len {
                return Err(TrackerError::InvalidExpenseNumber { number, len });
            }

            let removed = manager.remove(number - 1)?;
            storage.save_manager(manager)?;
            println!("Removed: {}", removed.format_line(symbol));
        }

        ExpenseCommands::Search { query } => {
            let query = query.trim();
            if query.is_empty() {
                return Err(TrackerError::Parse("Please enter a search term.".into()));
            }

            let results = manager.search(query);
            debug!(query, matches = results.len(), "search");
            print!("{}", format_matches(&results, symbol));
        }

        ExpenseCommands::Filter { category, from, to } => {
            let results = match (category, from, to) {
                (Some(category), _, _) => {
                    let categories = settings.category_set();
                    let canonical = categories.resolve(&category)?;
                    manager.filter_by_category(canonical)
                }
                (None, Some(from), Some(to)) => manager.filter_by_date_range(&from, &to)?,
                _ => {
                    return Err(TrackerError::Parse(
                        "Give --category, or both --from and --to".into(),
                    ))
                }
            };
            print!("{}", format_matches(&results, symbol));
        }
    }

    Ok(())
}
