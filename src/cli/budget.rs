//! Budget CLI commands
//!
//! Set monthly category budgets and compare them with spending.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget_line, format_budget_status};
use crate::error::{TrackerResult, ValidationError};
use crate::models::Money;
use crate::services::ExpenseManager;
use crate::storage::Storage;

use super::parse_month_or_current;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set or update the monthly budget for a category
    Set {
        /// Category name (case-insensitive)
        category: String,
        /// Monthly amount (e.g. "400" or "400.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show spending against each budget for a month
    Status {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    manager: &mut ExpenseManager,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let categories = settings.category_set();
            let category = categories.resolve(&category)?.to_string();

            let amount = Money::parse_amount(&amount)
                .ok()
                .filter(Money::is_valid_amount)
                .ok_or(ValidationError::InvalidAmount(amount))?;

            manager.set_budget(category.clone(), amount);
            storage.save_manager(manager)?;
            println!(
                "Budget for {} set to {}",
                category,
                amount.format_with_symbol(symbol)
            );

            let (year, month) = parse_month_or_current(None)?;
            if let Some(status) = manager
                .budget_status(year, month)
                .into_iter()
                .find(|s| s.category == category)
            {
                println!("{}", format_budget_line(&status, symbol));
            }
        }

        BudgetCommands::Status { month } => {
            let (year, month) = parse_month_or_current(month.as_deref())?;
            let statuses = manager.budget_status(year, month);
            print!("{}", format_budget_status(&statuses, year, month, symbol));
        }
    }

    Ok(())
}
