//! Service layer for the bank ledger
//!
//! The service layer owns the accounts and coordinates every mutation with
//! the snapshot sink, including the cross-account transfer.

pub mod account;
pub mod ledger;
pub mod transfer;

pub use account::AccountHandle;
pub use ledger::Ledger;
