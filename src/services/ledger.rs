//! Ledger service
//!
//! The aggregate root owning every account. All mutations end with a full
//! resync of the snapshot sink; the in-memory state stays authoritative even
//! when that resync fails.

use std::collections::HashMap;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::export::export_transactions_csv;
use crate::models::{
    Account, AccountCategory, AccountId, AccountSummary, Holder, Money, Transaction,
};
use crate::storage::{AccountRecord, SnapshotSink};

use super::account::AccountHandle;

/// Collection of accounts keyed by id, mirrored to a [`SnapshotSink`]
pub struct Ledger<S: SnapshotSink> {
    accounts: HashMap<AccountId, Account>,
    /// Insertion order, for stable listings and snapshots
    order: Vec<AccountId>,
    sink: S,
}

impl<S: SnapshotSink> Ledger<S> {
    /// Create an empty ledger without touching the sink
    pub fn new(sink: S) -> Self {
        Self {
            accounts: HashMap::new(),
            order: Vec::new(),
            sink,
        }
    }

    /// Rebuild a ledger from the rows currently in `sink`
    ///
    /// Each account's opening balance is its persisted balance and its
    /// transaction log starts empty.
    pub fn load(mut sink: S) -> LedgerResult<Self> {
        let records = sink.load()?;
        let mut ledger = Self::new(sink);

        for record in records {
            let account = record.into_account()?;
            let id = account.id();
            if ledger.accounts.contains_key(&id) {
                return Err(LedgerError::Persistence(format!(
                    "Duplicate account id {} in {}",
                    id,
                    ledger.sink.describe()
                )));
            }
            ledger.order.push(id);
            ledger.accounts.insert(id, account);
        }

        info!(
            accounts = ledger.order.len(),
            sink = %ledger.sink.describe(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Open a new account and resync the mirror
    pub fn create_account(
        &mut self,
        holder: Holder,
        category: AccountCategory,
        initial_balance: Money,
    ) -> LedgerResult<AccountId> {
        let account = Account::open(holder, category, initial_balance)?;
        let id = account.id();

        // A v4 collision would mean a broken RNG; never overwrite
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }

        info!(
            account = %id,
            category = %category,
            balance = %initial_balance,
            "created account"
        );
        self.order.push(id);
        self.accounts.insert(id, account);

        self.export_snapshot()?;
        Ok(id)
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
    }

    pub fn get_account(&self, id: AccountId) -> LedgerResult<&Account> {
        self.accounts
            .get(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Mutable handle whose operations resync the mirror
    pub fn get_account_mut(&mut self, id: AccountId) -> LedgerResult<AccountHandle<'_, S>> {
        if !self.accounts.contains_key(&id) {
            return Err(LedgerError::account_not_found(id));
        }
        Ok(AccountHandle::new(self, id))
    }

    /// Resolve user-supplied text to the id of an existing account
    pub fn resolve(&self, identifier: &str) -> LedgerResult<AccountId> {
        AccountId::parse(identifier)
            .ok()
            .filter(|id| self.accounts.contains_key(id))
            .ok_or_else(|| LedgerError::account_not_found(identifier.trim()))
    }

    /// Remove an account and resync the mirror
    ///
    /// Transfer entries in other accounts that point at it are left as they
    /// are; see [`counterparty`](Self::counterparty).
    pub fn delete_account(&mut self, id: AccountId) -> LedgerResult<Account> {
        let account = self
            .accounts
            .remove(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        self.order.retain(|existing| *existing != id);

        info!(account = %id, "deleted account");
        self.export_snapshot()?;
        Ok(account)
    }

    /// Accounts in insertion order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.order.iter().filter_map(|id| self.accounts.get(id))
    }

    /// Snapshot of every account's summary fields, in insertion order
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts().map(Account::summary).collect()
    }

    /// The other side of a transfer entry
    ///
    /// `None` when the entry is not a transfer or the counterparty has been
    /// deleted; callers should present that as an unknown counterparty.
    pub fn counterparty(&self, transaction: &Transaction) -> Option<&Account> {
        transaction
            .counterparty()
            .and_then(|id| self.accounts.get(&id))
    }

    /// Rewrite the whole mirror from current in-memory state
    pub fn export_snapshot(&mut self) -> LedgerResult<()> {
        let records: Vec<AccountRecord> =
            self.accounts().map(AccountRecord::from_account).collect();

        match self.sink.replace_all(&records) {
            Ok(()) => {
                debug!(rows = records.len(), sink = %self.sink.describe(), "resynced mirror");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, sink = %self.sink.describe(), "mirror resync failed");
                Err(e)
            }
        }
    }

    /// Write one account's transaction history as CSV
    pub fn export_history<W: Write>(&self, id: AccountId, writer: &mut W) -> LedgerResult<()> {
        let account = self.get_account(id)?;
        export_transactions_csv(account, writer)
    }

    pub(crate) fn account_entry(&mut self, id: AccountId) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Take an account out of the map so it can be borrowed alongside another
    ///
    /// Must be paired with [`put_back`](Self::put_back); `order` is untouched.
    pub(crate) fn take_out(&mut self, id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .remove(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    pub(crate) fn put_back(&mut self, account: Account) {
        self.accounts.insert(account.id(), account);
    }
}
