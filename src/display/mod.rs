//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts and transactions as plain-text
//! tables, detail views and register rows.

pub mod account;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use transaction::format_transaction_row;
