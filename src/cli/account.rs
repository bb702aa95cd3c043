//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::LedgerResult;
use crate::models::{AccountCategory, AccountUpdate, Holder};
use crate::services::Ledger;
use crate::storage::SnapshotSink;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Holder's first name
        first_name: String,
        /// Holder's last name
        last_name: String,
        /// Holder's age
        #[arg(long, default_value_t = 0)]
        age: u32,
        /// Holder's state of residence
        #[arg(long, default_value = "")]
        state: String,
        /// Holder's occupation
        #[arg(long, default_value = "")]
        job: String,
        /// Account type (checking, savings)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account ID
        account: String,
    },
    /// Update holder information
    Update {
        /// Account ID
        account: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        job: Option<String>,
    },
    /// Delete an account
    Delete {
        /// Account ID
        account: String,
    },
    /// Credit interest to a savings account
    Accrue {
        /// Account ID
        account: String,
        /// Annual rate as a fraction (0.05 = 5%); defaults to the configured rate
        #[arg(short, long)]
        rate: Option<Decimal>,
        /// Number of months to accrue
        #[arg(short, long, default_value_t = 1)]
        months: u32,
    },
}

/// Handle an account command
pub fn handle_account_command<S: SnapshotSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            first_name,
            last_name,
            age,
            state,
            job,
            account_type,
            balance,
        } => {
            let category: AccountCategory = account_type.parse()?;
            let opening = parse_amount(&balance)?;
            let holder = Holder::new(first_name, last_name, age, state, job);

            let id = ledger.create_account(holder, category, opening)?;
            let account = ledger.get_account(id)?;

            println!("Created account for {}", account.holder().full_name());
            println!("  Type: {}", account.category());
            println!(
                "  Opening Balance: {}",
                account.balance().format_with_symbol(symbol)
            );
            println!("Account ID: {}", id);
        }

        AccountCommands::List => {
            print!("{}", format_account_list(&ledger.list_accounts(), symbol));
            println!();
        }

        AccountCommands::Show { account } => {
            let id = ledger.resolve(&account)?;
            let account = ledger.get_account(id)?;
            print!("{}", format_account_details(account, symbol));
        }

        AccountCommands::Update {
            account,
            first_name,
            last_name,
            age,
            state,
            job,
        } => {
            let id = ledger.resolve(&account)?;
            let update = AccountUpdate {
                first_name,
                last_name,
                age,
                state,
                job,
            };

            if update.is_empty() {
                println!("No changes specified. Use --first-name, --last-name, --age, --state or --job.");
                return Ok(());
            }

            if ledger.get_account_mut(id)?.update_info(update)? {
                println!(
                    "Updated account: {}",
                    ledger.get_account(id)?.holder().full_name()
                );
            } else {
                println!("No changes applied to account {}", id);
            }
        }

        AccountCommands::Delete { account } => {
            let id = ledger.resolve(&account)?;
            let removed = ledger.delete_account(id)?;
            println!(
                "Deleted account {} ({})",
                removed.id(),
                removed.holder().full_name()
            );
        }

        AccountCommands::Accrue {
            account,
            rate,
            months,
        } => {
            let id = ledger.resolve(&account)?;
            let rate = rate.unwrap_or(settings.default_interest_rate);

            let accrued = ledger.get_account_mut(id)?.accrue_interest(rate, months)?;
            match accrued {
                Some(txn) => println!(
                    "Accrued {} interest; new balance {}",
                    txn.amount().format_with_symbol(symbol),
                    ledger.get_account(id)?.balance().format_with_symbol(symbol)
                ),
                None => println!("Interest rounds to zero; balance unchanged"),
            }
        }
    }

    Ok(())
}
