//! Core data models for the bank ledger
//!
//! This module contains the data structures that represent the banking
//! domain: accounts, their holders, transactions, ids and money.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{
    Account, AccountCategory, AccountSummary, AccountUpdate, Holder, TransactionHistory,
};
pub use ids::{AccountId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind, TransactionRecord, TransferResult};
