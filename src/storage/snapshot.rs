//! Account snapshot sinks
//!
//! The durable mirror of the ledger: one row per account, rewritten in full
//! after every mutation. The [`SnapshotSink`] trait keeps the ledger
//! independent of how the rows are stored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountCategory, AccountId, Holder, Money};

use super::file_io::{read_csv, write_csv_atomic};

/// Column set of the accounts mirror, in file order
pub const ACCOUNT_COLUMNS: [&str; 8] = [
    "account_id",
    "first_name",
    "last_name",
    "age",
    "state",
    "job",
    "account_type",
    "balance",
];

/// One row of the accounts mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub state: String,
    pub job: String,
    pub account_type: String,
    /// Always rendered with exactly two decimal places
    pub balance: String,
}

impl AccountRecord {
    pub fn from_account(account: &Account) -> Self {
        let holder = account.holder();
        Self {
            account_id: account.id().to_string(),
            first_name: holder.first_name.clone(),
            last_name: holder.last_name.clone(),
            age: holder.age,
            state: holder.state.clone(),
            job: holder.job.clone(),
            account_type: account.category().to_string(),
            balance: account.balance().to_plain_string(),
        }
    }

    /// Rebuild the account this row describes, with an empty transaction log
    pub fn into_account(self) -> LedgerResult<Account> {
        let id = AccountId::parse(&self.account_id).map_err(|e| {
            LedgerError::Persistence(format!("Invalid account id '{}': {}", self.account_id, e))
        })?;
        let category: AccountCategory = self.account_type.parse()?;
        let balance = Money::parse(&self.balance).map_err(|e| {
            LedgerError::Persistence(format!("Invalid balance for account {}: {}", id, e))
        })?;

        let holder = Holder {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            state: self.state,
            job: self.job,
        };

        Account::restore(id, holder, category, balance).map_err(|e| match e {
            LedgerError::InvalidAmount(amount) => LedgerError::Persistence(format!(
                "Negative balance {} for account {}",
                amount, id
            )),
            other => other,
        })
    }
}

/// Durable tabular mirror of account state
pub trait SnapshotSink {
    /// Read all rows currently stored
    fn load(&mut self) -> LedgerResult<Vec<AccountRecord>>;

    /// Replace the stored rows with `records`
    fn replace_all(&mut self, records: &[AccountRecord]) -> LedgerResult<()>;

    /// Short description for log output
    fn describe(&self) -> String;
}

/// CSV-file mirror (`accounts.csv`)
#[derive(Debug, Clone)]
pub struct CsvSnapshotStore {
    path: PathBuf,
}

impl CsvSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotSink for CsvSnapshotStore {
    fn load(&mut self) -> LedgerResult<Vec<AccountRecord>> {
        read_csv(&self.path, &ACCOUNT_COLUMNS)
    }

    fn replace_all(&mut self, records: &[AccountRecord]) -> LedgerResult<()> {
        write_csv_atomic(&self.path, &ACCOUNT_COLUMNS, records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process mirror, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    records: Vec<AccountRecord>,
    writes: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows
    pub fn with_records(records: Vec<AccountRecord>) -> Self {
        Self { records, writes: 0 }
    }

    pub fn records(&self) -> &[AccountRecord] {
        &self.records
    }

    /// Number of full rewrites performed so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SnapshotSink for MemorySnapshotStore {
    fn load(&mut self) -> LedgerResult<Vec<AccountRecord>> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: &[AccountRecord]) -> LedgerResult<()> {
        self.records = records.to_vec();
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
