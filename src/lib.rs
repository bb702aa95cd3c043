//! Bank Ledger - in-memory bank accounts mirrored to a CSV file
//!
//! This library keeps a set of checking and savings accounts in memory,
//! records every deposit, withdrawal and transfer in a per-account log, and
//! rewrites a flat accounts file after each successful mutation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, money, ids)
//! - `storage`: CSV mirror and atomic file writes
//! - `services`: The ledger and its account handles
//! - `export`: Transaction history export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `ledger` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use bank_ledger::models::{AccountCategory, Holder, Money};
//! use bank_ledger::services::Ledger;
//! use bank_ledger::storage::MemorySnapshotStore;
//!
//! let mut ledger = Ledger::new(MemorySnapshotStore::new());
//! let id = ledger
//!     .create_account(
//!         Holder::new("John", "Doe", 30, "California", "Employed"),
//!         AccountCategory::Checking,
//!         Money::from_cents(50000),
//!     )
//!     .unwrap();
//!
//! ledger.get_account_mut(id).unwrap().deposit(Money::from_cents(1000)).unwrap();
//! assert_eq!(ledger.get_account(id).unwrap().balance().cents(), 51000);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use services::Ledger;
