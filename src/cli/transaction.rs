//! Transaction CLI commands
//!
//! Deposits, withdrawals and transfers between accounts.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::format_transaction_row;
use crate::error::LedgerResult;
use crate::services::Ledger;
use crate::storage::SnapshotSink;

use super::parse_amount;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Deposit money into an account
    Deposit {
        /// Account ID
        account: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },
    /// Withdraw money from an account
    Withdraw {
        /// Account ID
        account: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },
    /// Transfer money between two accounts
    Transfer {
        /// Source account ID
        from: String,
        /// Destination account ID
        to: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<S: SnapshotSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Deposit { account, amount } => {
            let id = ledger.resolve(&account)?;
            let amount = parse_amount(&amount)?;

            let txn = ledger.get_account_mut(id)?.deposit(amount)?;
            println!("{}", format_transaction_row(ledger, &txn, symbol));
            println!(
                "Balance: {}",
                ledger.get_account(id)?.balance().format_with_symbol(symbol)
            );
        }

        TransactionCommands::Withdraw { account, amount } => {
            let id = ledger.resolve(&account)?;
            let amount = parse_amount(&amount)?;

            let txn = ledger.get_account_mut(id)?.withdraw(amount)?;
            println!("{}", format_transaction_row(ledger, &txn, symbol));
            println!(
                "Balance: {}",
                ledger.get_account(id)?.balance().format_with_symbol(symbol)
            );
        }

        TransactionCommands::Transfer { from, to, amount } => {
            let from_id = ledger.resolve(&from)?;
            let to_id = ledger.resolve(&to)?;
            let amount = parse_amount(&amount)?;

            let result = ledger.transfer(from_id, to_id, amount)?;

            println!("Transfer created:");
            println!(
                "  From: {}",
                format_transaction_row(ledger, &result.from_transaction, symbol)
            );
            println!(
                "  To:   {}",
                format_transaction_row(ledger, &result.to_transaction, symbol)
            );
        }
    }

    Ok(())
}
