use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_backup_command, handle_budget_command, handle_data_command, handle_expense_command,
    handle_report_command, BackupCommands, BudgetCommands, DataCommands, ExpenseCommands,
    ReportCommands,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::logging;
use expense_tracker::services::ExpenseManager;
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker with category budgets and text reports",
    long_about = "Record expenses by category, set monthly budgets per category, \
                  and print monthly, category, trend and summary reports. \
                  Data is stored as JSON under the directory given by \
                  EXPENSE_TRACKER_DATA_DIR, or the platform config directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Data(DataCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Monthly category budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Create, list and restore backups
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    let Some(command) = cli.command else {
        println!("expense - personal expense tracker");
        println!();
        println!("Run 'expense --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Backup(cmd) => handle_backup_command(&paths, &settings, cmd)?,

        Commands::Config => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Expenses file:    {}", paths.expenses_file().display());
            println!("Budget file:      {}", paths.budget_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Categories:       {}", settings.category_set().describe());
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Trend months:     {}", settings.trend_months);
            println!("  Chart width:      {}", settings.bar_width);
            println!("  Recent expenses:  {}", settings.recent_limit);
            println!("  Backups kept:     {}", settings.backup_retention.keep);
        }

        Commands::Expense(cmd) => {
            let mut manager = load_manager(&storage, &settings)?;
            handle_expense_command(&storage, &settings, &mut manager, cmd)?;
        }

        Commands::Data(cmd) => {
            let mut manager = load_manager(&storage, &settings)?;
            handle_data_command(&storage, &settings, &mut manager, cmd)?;
        }

        Commands::Report(cmd) => {
            let manager = load_manager(&storage, &settings)?;
            handle_report_command(&settings, &manager, cmd)?;
        }

        Commands::Budget(cmd) => {
            let mut manager = load_manager(&storage, &settings)?;
            handle_budget_command(&storage, &settings, &mut manager, cmd)?;
        }
    }

    Ok(())
}

/// Load stored expenses and budgets; skipped records are logged by storage
fn load_manager(storage: &Storage, settings: &Settings) -> Result<ExpenseManager> {
    let (manager, rejected) = storage.load_manager(&settings.category_set())?;
    if !rejected.is_empty() {
        eprintln!(
            "Warning: skipped {} invalid stored expense(s)",
            rejected.len()
        );
    }
    Ok(manager)
}
