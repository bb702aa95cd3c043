//! CSV Export functionality
//!
//! Exports an account's transaction history to CSV format.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, TransactionRecord};

/// Column set of a transaction-history export, in file order
pub const TRANSACTION_COLUMNS: [&str; 4] = [
    "type",
    "amount",
    "counterparty_account_id",
    "transaction_id",
];

/// Export an account's transactions to CSV, oldest first
///
/// Deposits and withdrawals leave the counterparty column empty.
pub fn export_transactions_csv<W: Write>(account: &Account, writer: &mut W) -> LedgerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(TRANSACTION_COLUMNS)?;
    for record in account.transaction_history() {
        csv_writer.serialize(record)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to write export: {}", e)))?;
    Ok(())
}
