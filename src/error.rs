//! Custom error types for the bank ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{AccountId, Money};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Non-positive amount passed to a balance-changing operation
    #[error("Invalid amount: {0} (amount must be greater than zero)")]
    InvalidAmount(Money),

    /// Withdrawal or transfer larger than the current balance
    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        requested: Money,
        available: Money,
    },

    /// Crediting the amount would exceed the representable balance
    #[error("Balance overflow in account {account}: cannot add {amount} to {balance}")]
    BalanceOverflow {
        account: AccountId,
        balance: Money,
        amount: Money,
    },

    /// Unknown account category, or an operation not allowed for the category
    #[error("Invalid account category: {0}")]
    InvalidCategory(String),

    /// Non-positive interest rate or accrual period
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// Lookup of an account that does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// A freshly generated account id collided with an existing one
    #[error("Account already exists: {0}")]
    DuplicateAccount(AccountId),

    /// Validation errors for holder data and operation arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// The persisted mirror could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create a "not found" error for an account identifier
    pub fn account_not_found(identifier: impl ToString) -> Self {
        Self::AccountNotFound(identifier.to_string())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found("unknown-id");
        assert_eq!(err.to_string(), "Account not found: unknown-id");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = LedgerError::InvalidAmount(Money::from_cents(-500));
        assert_eq!(
            err.to_string(),
            "Invalid amount: -$5.00 (amount must be greater than zero)"
        );
    }

    #[test]
    fn test_insufficient_funds_error() {
        let account = AccountId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let err = LedgerError::InsufficientFunds {
            account,
            requested: Money::from_cents(60000),
            available: Money::from_cents(50000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 550e8400-e29b-41d4-a716-446655440000: requested $600.00, available $500.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
