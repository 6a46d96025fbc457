//! CLI commands for reports
//!
//! Each report is printed through its `format_terminal_with` rendering using
//! the configured currency symbol, which also covers the "nothing to show"
//! messages.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::reports::{Reports, TextReport, Visualization};
use crate::services::ExpenseManager;

use super::parse_month_or_current;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals, category breakdown and recent expenses for one month
    Monthly {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending per category across all expenses, with a bar chart
    #[command(alias = "categories")]
    Breakdown,

    /// Monthly totals over a recent window of 30-day months
    Trends {
        /// Number of months to look back (defaults to `trend_months` in settings)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Count, total, average, extremes and top category
    #[command(alias = "statistics")]
    Stats,
}

/// Handle report commands
pub fn handle_report_command(
    settings: &Settings,
    manager: &ExpenseManager,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let reports = Reports::new(manager.expenses());
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Monthly { month } => {
            let (year, month) = parse_month_or_current(month.as_deref())?;
            let report = reports.monthly_report_with_limit(year, month, settings.recent_limit);
            println!("{}", report.format_terminal_with(symbol));
        }

        ReportCommands::Breakdown => {
            println!("{}", reports.category_breakdown().format_terminal_with(symbol));

            let chart = Visualization::generate(&reports.category_totals(), settings.bar_width);
            println!("{}", chart.format_terminal_with(symbol));
        }

        ReportCommands::Trends { months } => {
            let months = months.unwrap_or(settings.trend_months);
            println!("{}", reports.expense_trends(months).format_terminal_with(symbol));
        }

        ReportCommands::Stats => {
            println!("{}", reports.statistics().format_terminal_with(symbol));
        }
    }

    Ok(())
}
