//! Account model
//!
//! A checking or savings account: holder metadata, a balance that never goes
//! negative, and an append-only log of the transactions that moved it.
//!
//! Methods here only touch in-memory state. Persisting the change is the job
//! of [`AccountHandle`](crate::services::AccountHandle), which wraps every
//! mutator with a resync of the ledger mirror.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::AccountId;
use super::money::Money;
use super::transaction::{Transaction, TransactionKind, TransactionRecord, TransferResult};
use crate::error::{LedgerError, LedgerResult};

/// Category of bank account, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountCategory {
    #[default]
    Checking,
    Savings,
}

impl AccountCategory {
    /// Parse a category from user or file text (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            _ => None,
        }
    }
}

impl FromStr for AccountCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            LedgerError::InvalidCategory(format!(
                "'{}' (must be 'Checking' or 'Savings')",
                s.trim()
            ))
        })
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

/// Descriptive metadata about the account holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub state: String,
    pub job: String,
}

impl Holder {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        state: impl Into<String>,
        job: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            state: state.into(),
            job: job.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Validate the holder data
    pub fn validate(&self) -> LedgerResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(LedgerError::Validation("First name cannot be empty".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(LedgerError::Validation("Last name cannot be empty".into()));
        }
        Ok(())
    }
}

/// Partial update of the mutable holder fields
///
/// `None` and blank strings leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub state: Option<String>,
    pub job: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.state.is_none()
            && self.job.is_none()
    }
}

/// Snapshot of an account's summary fields, as returned by listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub holder: Holder,
    pub category: AccountCategory,
    pub balance: Money,
    pub transaction_count: usize,
}

/// A bank account
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    holder: Holder,
    category: AccountCategory,
    opening_balance: Money,
    balance: Money,
    transactions: Vec<Transaction>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Open a new account with a fresh id
    pub fn open(
        holder: Holder,
        category: AccountCategory,
        opening_balance: Money,
    ) -> LedgerResult<Self> {
        Self::restore(AccountId::new(), holder, category, opening_balance)
    }

    /// Rebuild an account with a known id, e.g. from the persisted mirror
    ///
    /// The transaction log starts empty; `balance` becomes the opening balance.
    pub fn restore(
        id: AccountId,
        holder: Holder,
        category: AccountCategory,
        balance: Money,
    ) -> LedgerResult<Self> {
        holder.validate()?;
        if balance.is_negative() {
            return Err(LedgerError::InvalidAmount(balance));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            holder,
            category,
            opening_balance: balance,
            balance,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder(&self) -> &Holder {
        &self.holder
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Balance at creation (or at reload from the mirror)
    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// Full log in chronological order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Opening balance plus the signed effect of every logged entry
    ///
    /// Always equal to [`balance`](Self::balance).
    pub fn ledger_balance(&self) -> Money {
        let net: Money = self.transactions.iter().map(Transaction::signed_amount).sum();
        self.opening_balance + net
    }

    /// Deposit money into the account
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        let balance = self.credited(amount)?;

        self.balance = balance;
        Ok(self.record(Transaction::deposit(amount)))
    }

    /// Withdraw money from the account
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        self.ensure_covers(amount)?;

        self.balance -= amount;
        Ok(self.record(Transaction::withdrawal(amount)))
    }

    /// Move money from this account into `target`
    ///
    /// All checks run before either side is touched, so a failed transfer
    /// leaves both balances and both logs unchanged. The target's resulting
    /// balance is not bounded.
    pub fn transfer(&mut self, target: &mut Account, amount: Money) -> LedgerResult<TransferResult> {
        ensure_positive(amount)?;
        self.ensure_covers(amount)?;
        let target_balance = target.credited(amount)?;

        self.balance -= amount;
        target.balance = target_balance;

        let from_transaction = self.record(Transaction::transfer_out(amount, target.id));
        let to_transaction = target.record(Transaction::transfer_in(amount, self.id));

        Ok(TransferResult {
            from_transaction,
            to_transaction,
        })
    }

    /// Apply a partial update to the holder metadata
    ///
    /// Returns whether anything changed.
    pub fn update_info(&mut self, update: AccountUpdate) -> bool {
        let mut changed = false;

        changed |= assign_text(&mut self.holder.first_name, update.first_name);
        changed |= assign_text(&mut self.holder.last_name, update.last_name);
        changed |= assign_text(&mut self.holder.state, update.state);
        changed |= assign_text(&mut self.holder.job, update.job);

        if let Some(age) = update.age {
            if age != self.holder.age {
                self.holder.age = age;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Credit interest on a savings account
    ///
    /// Interest is `balance * (annual_rate / 12) * months`, rounded to cents,
    /// and goes through [`deposit`](Self::deposit). When it rounds to zero
    /// nothing is recorded and `None` is returned.
    pub fn accrue_interest(
        &mut self,
        annual_rate: Decimal,
        months: u32,
    ) -> LedgerResult<Option<Transaction>> {
        if self.category != AccountCategory::Savings {
            return Err(LedgerError::InvalidCategory(format!(
                "interest accrues only on Savings accounts, {} is {}",
                self.id, self.category
            )));
        }
        if annual_rate <= Decimal::ZERO {
            return Err(LedgerError::InvalidRate(format!(
                "annual rate must be greater than zero, got {}",
                annual_rate
            )));
        }
        if months == 0 {
            return Err(LedgerError::InvalidRate(
                "accrual period must be at least one month".into(),
            ));
        }

        let interest = self
            .balance
            .to_decimal()
            .checked_mul(annual_rate)
            .and_then(|v| v.checked_div(Decimal::from(12)))
            .and_then(|v| v.checked_mul(Decimal::from(months)))
            .and_then(Money::from_decimal)
            .ok_or_else(|| LedgerError::InvalidRate("interest amount out of range".into()))?;

        if interest.is_zero() {
            return Ok(None);
        }
        self.deposit(interest).map(Some)
    }

    /// Entries of one kind, in chronological order
    pub fn filter_transactions(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.kind() == kind).collect()
    }

    /// The log as a restartable sequence of flat records
    pub fn transaction_history(&self) -> TransactionHistory<'_> {
        TransactionHistory {
            entries: &self.transactions,
        }
    }

    /// Human-readable summary of identity, metadata, category and balance
    pub fn details(&self) -> String {
        format!(
            "Account ID: {}\n\
             Account Holder: {}\n\
             Age: {}\n\
             State: {}\n\
             Job: {}\n\
             Account Type: {}\n\
             Balance: {}",
            self.id,
            self.holder.full_name(),
            self.holder.age,
            self.holder.state,
            self.holder.job,
            self.category,
            self.balance
        )
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            holder: self.holder.clone(),
            category: self.category,
            balance: self.balance,
            transaction_count: self.transactions.len(),
        }
    }

    fn ensure_covers(&self, amount: Money) -> LedgerResult<()> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                account: self.id,
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    fn credited(&self, amount: Money) -> LedgerResult<Money> {
        self.balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: self.id,
                balance: self.balance,
                amount,
            })
    }

    fn record(&mut self, transaction: Transaction) -> Transaction {
        self.transactions.push(transaction.clone());
        self.updated_at = Utc::now();
        transaction
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.holder.full_name(), self.category)
    }
}

/// Lazy, restartable view over an account's log as [`TransactionRecord`]s
#[derive(Debug, Clone, Copy)]
pub struct TransactionHistory<'a> {
    entries: &'a [Transaction],
}

impl<'a> TransactionHistory<'a> {
    pub fn iter(&self) -> impl Iterator<Item = TransactionRecord> + 'a {
        self.entries.iter().map(Transaction::to_record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for TransactionHistory<'a> {
    type Item = TransactionRecord;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Transaction>, fn(&Transaction) -> TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(Transaction::to_record as fn(&Transaction) -> TransactionRecord)
    }
}

fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

fn assign_text(field: &mut String, value: Option<String>) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() && *field != v.trim() => {
            *field = v.trim().to_string();
            true
        }
        _ => false,
    }
}
