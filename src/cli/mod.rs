//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger service.

pub mod account;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::LedgerError;
use crate::models::Money;

/// Parse a user-entered amount such as "100", "100.5" or "100.50"
pub(crate) fn parse_amount(input: &str) -> Result<Money, LedgerError> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '100.00' or '100'. Error: {}",
            input, e
        ))
    })
}
