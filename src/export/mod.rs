//! Export module for the bank ledger
//!
//! Transaction histories are exported per account as CSV. The accounts
//! mirror itself is maintained by the storage layer, not here.

pub mod csv;

pub use self::csv::{export_transactions_csv, TRANSACTION_COLUMNS};
