//! Transaction model
//!
//! Immutable records of balance-affecting events. Transfers carry the id of
//! the account on the other side; deposits and withdrawals never do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Kind of balance-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "Deposit")]
    Deposit,
    #[serde(rename = "Withdrawal")]
    Withdrawal,
    #[serde(rename = "Transfer Out")]
    TransferOut,
    #[serde(rename = "Transfer In")]
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind adds to the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Whether entries of this kind carry a counterparty
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferOut | Self::TransferIn)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdrawal => write!(f, "Withdrawal"),
            Self::TransferOut => write!(f, "Transfer Out"),
            Self::TransferIn => write!(f, "Transfer In"),
        }
    }
}

/// One balance-affecting event in an account's log
///
/// Constructed only by [`Account`](super::Account) after it has validated the
/// amount, so `amount` is always positive and `counterparty` is present
/// exactly for transfer kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    amount: Money,
    counterparty: Option<AccountId>,
    recorded_at: DateTime<Utc>,
}

impl Transaction {
    fn new(kind: TransactionKind, amount: Money, counterparty: Option<AccountId>) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            counterparty,
            recorded_at: Utc::now(),
        }
    }

    pub(crate) fn deposit(amount: Money) -> Self {
        Self::new(TransactionKind::Deposit, amount, None)
    }

    pub(crate) fn withdrawal(amount: Money) -> Self {
        Self::new(TransactionKind::Withdrawal, amount, None)
    }

    pub(crate) fn transfer_out(amount: Money, to: AccountId) -> Self {
        Self::new(TransactionKind::TransferOut, amount, Some(to))
    }

    pub(crate) fn transfer_in(amount: Money, from: AccountId) -> Self {
        Self::new(TransactionKind::TransferIn, amount, Some(from))
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Unsigned amount of the event
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// The other account of a transfer
    pub fn counterparty(&self) -> Option<AccountId> {
        self.counterparty
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Effect of this entry on the owning account's balance
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Flatten into the key/value form used by history views and export
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            kind: self.kind,
            amount: self.amount.to_plain_string(),
            counterparty_account_id: self.counterparty.map(|id| id.to_string()),
            transaction_id: self.id.to_string(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.counterparty) {
            (TransactionKind::TransferOut, Some(to)) => {
                write!(f, "{} {} to {}", self.kind, self.amount, to)
            }
            (TransactionKind::TransferIn, Some(from)) => {
                write!(f, "{} {} from {}", self.kind, self.amount, from)
            }
            _ => write!(f, "{} {}", self.kind, self.amount),
        }
    }
}

/// Flat, serializable form of a [`Transaction`]
///
/// Field names match the columns of the transaction-history export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: String,
    pub counterparty_account_id: Option<String>,
    pub transaction_id: String,
}

/// Result of a transfer between two accounts
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// The outflow entry appended to the source account
    pub from_transaction: Transaction,
    /// The inflow entry appended to the destination account
    pub to_transaction: Transaction,
}
