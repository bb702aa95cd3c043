use anyhow::Result;
use clap::{Parser, Subcommand};

use bank_ledger::cli::{
    handle_account_command, handle_transaction_command, AccountCommands, TransactionCommands,
};
use bank_ledger::config::{LedgerPaths, Settings};
use bank_ledger::logging;
use bank_ledger::services::Ledger;
use bank_ledger::storage::CsvSnapshotStore;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "In-memory bank account ledger with a CSV mirror",
    long_about = "Manage checking and savings accounts from the command line. \
                  Every change is mirrored to an accounts CSV file, which is \
                  reloaded on the next invocation."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Deposits, withdrawals and transfers
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Initialize the ledger directory and an empty accounts file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_filter);

    match cli.command {
        Some(Commands::Account(cmd)) => {
            let mut ledger = Ledger::load(CsvSnapshotStore::new(paths.accounts_file()))?;
            handle_account_command(&mut ledger, &settings, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            let mut ledger = Ledger::load(CsvSnapshotStore::new(paths.accounts_file()))?;
            handle_transaction_command(&mut ledger, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let ledger = Ledger::load(CsvSnapshotStore::new(paths.accounts_file()))?;
            println!("Initialization complete!");
            println!(
                "Accounts file: {} ({} accounts)",
                paths.accounts_file().display(),
                ledger.len()
            );
        }
        Some(Commands::Config) => {
            println!("Bank Ledger Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Accounts file:    {}", paths.accounts_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log filter:      {}", settings.log_filter);
            println!("  Default interest rate: {}", settings.default_interest_rate);
        }
        None => {
            println!("Bank Ledger - accounts, deposits and transfers");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
