//! Account service
//!
//! [`AccountHandle`] is the mutable view of one ledger account. Each mutator
//! applies the change in memory and then resyncs the ledger mirror, so
//! callers holding a handle can never skip persistence.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::LedgerResult;
use crate::models::{AccountId, AccountUpdate, Money, Transaction, TransferResult};
use crate::storage::SnapshotSink;

use super::ledger::Ledger;

/// Mutable handle to one account in a [`Ledger`]
///
/// Only mutators live here. Read the [`Account`](crate::models::Account)
/// back through [`Ledger::get_account`] once the handle is dropped.
pub struct AccountHandle<'a, S: SnapshotSink> {
    ledger: &'a mut Ledger<S>,
    id: AccountId,
}

impl<'a, S: SnapshotSink> AccountHandle<'a, S> {
    pub(crate) fn new(ledger: &'a mut Ledger<S>, id: AccountId) -> Self {
        Self { ledger, id }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Deposit money and resync
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<Transaction> {
        let transaction = self.ledger.account_entry(self.id)?.deposit(amount)?;
        self.ledger.export_snapshot()?;
        Ok(transaction)
    }

    /// Withdraw money and resync
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<Transaction> {
        let transaction = self.ledger.account_entry(self.id)?.withdraw(amount)?;
        self.ledger.export_snapshot()?;
        Ok(transaction)
    }

    /// Transfer money to another account of the same ledger and resync
    pub fn transfer(&mut self, target: AccountId, amount: Money) -> LedgerResult<TransferResult> {
        self.ledger.transfer(self.id, target, amount)
    }

    /// Update holder metadata and resync
    ///
    /// The mirror is rewritten even when nothing changed, matching every
    /// other mutator.
    pub fn update_info(&mut self, update: AccountUpdate) -> LedgerResult<bool> {
        let changed = self.ledger.account_entry(self.id)?.update_info(update);
        if changed {
            info!(account = %self.id, "updated holder info");
        }
        self.ledger.export_snapshot()?;
        Ok(changed)
    }

    /// Credit savings interest and resync
    ///
    /// Returns the deposit entry, or `None` when the interest rounded to zero.
    pub fn accrue_interest(
        &mut self,
        annual_rate: Decimal,
        months: u32,
    ) -> LedgerResult<Option<Transaction>> {
        let accrued = self
            .ledger
            .account_entry(self.id)?
            .accrue_interest(annual_rate, months)?;

        if let Some(transaction) = &accrued {
            info!(
                account = %self.id,
                rate = %annual_rate,
                months,
                interest = %transaction.amount(),
                "accrued interest"
            );
            self.ledger.export_snapshot()?;
        }
        Ok(accrued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{AccountCategory, Holder, TransactionKind};
    use crate::storage::{AccountRecord, MemorySnapshotStore};
    use rust_decimal_macros::dec;

    struct BrokenSink;

    impl SnapshotSink for BrokenSink {
        fn load(&mut self) -> LedgerResult<Vec<AccountRecord>> {
            Ok(Vec::new())
        }

        fn replace_all(&mut self, _records: &[AccountRecord]) -> LedgerResult<()> {
            Err(LedgerError::Persistence("disk full".into()))
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    /// An account in a ledger whose mirror rejects every write
    fn broken_ledger_with(category: AccountCategory, cents: i64) -> (Ledger<BrokenSink>, AccountId) {
        let mut ledger = Ledger::new(BrokenSink);
        let result = ledger.create_account(
            Holder::new("John", "Doe", 30, "California", "Employed"),
            category,
            Money::from_cents(cents),
        );
        assert!(matches!(result, Err(LedgerError::Persistence(_))));
        let id = ledger.list_accounts()[0].id;
        (ledger, id)
    }

    fn ledger_with(category: AccountCategory, cents: i64) -> (Ledger<MemorySnapshotStore>, AccountId) {
        let mut ledger = Ledger::new(MemorySnapshotStore::new());
        let id = ledger
            .create_account(
                Holder::new("John", "Doe", 30, "California", "Employed"),
                category,
                Money::from_cents(cents),
            )
            .unwrap();
        (ledger, id)
    }

    #[test]
    fn test_deposit_through_handle_resyncs() {
        let (mut ledger, id) = ledger_with(AccountCategory::Checking, 50000);

        let mut handle = ledger.get_account_mut(id).unwrap();
        assert_eq!(handle.id(), id);
        handle.deposit(Money::from_cents(50000)).unwrap();
        assert_eq!(ledger.get_account(id).unwrap().balance().cents(), 100000);

        assert_eq!(ledger.sink().write_count(), 2);
        assert_eq!(ledger.sink().records()[0].balance, "1000.00");
        let account = ledger.get_account(id).unwrap();
        assert_eq!(account.transactions().len(), 1);
        assert_eq!(account.transactions()[0].kind(), TransactionKind::Deposit);
    }

    #[test]
    fn test_failed_withdraw_does_not_resync() {
        let (mut ledger, id) = ledger_with(AccountCategory::Checking, 50000);

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .withdraw(Money::from_cents(60000))
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(ledger.sink().write_count(), 1);
        assert_eq!(ledger.sink().records()[0].balance, "500.00");
        assert!(ledger.get_account(id).unwrap().transactions().is_empty());
    }

    #[test]
    fn test_update_info_resyncs_metadata() {
        let (mut ledger, id) = ledger_with(AccountCategory::Checking, 0);

        let changed = ledger
            .get_account_mut(id)
            .unwrap()
            .update_info(AccountUpdate {
                last_name: Some("Smith".into()),
                job: Some("Retired".into()),
                ..Default::default()
            })
            .unwrap();

        assert!(changed);
        let row = &ledger.sink().records()[0];
        assert_eq!(row.last_name, "Smith");
        assert_eq!(row.job, "Retired");
        assert_eq!(row.first_name, "John");
    }

    #[test]
    fn test_accrue_interest_through_handle() {
        let (mut ledger, id) = ledger_with(AccountCategory::Savings, 120000);

        let txn = ledger
            .get_account_mut(id)
            .unwrap()
            .accrue_interest(dec!(0.06), 1)
            .unwrap()
            .unwrap();

        assert_eq!(txn.amount().cents(), 600);
        assert_eq!(ledger.sink().records()[0].balance, "1206.00");
        assert_eq!(
            ledger
                .get_account(id)
                .unwrap()
                .filter_transactions(TransactionKind::Deposit)
                .len(),
            1
        );
    }

    #[test]
    fn test_accrue_interest_on_checking_is_rejected() {
        let (mut ledger, id) = ledger_with(AccountCategory::Checking, 120000);

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .accrue_interest(dec!(0.06), 1)
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvalidCategory(_)));
        assert_eq!(ledger.sink().write_count(), 1);
    }

    #[test]
    fn test_failed_resync_keeps_deposit_and_withdrawal() {
        let (mut ledger, id) = broken_ledger_with(AccountCategory::Checking, 50000);

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .deposit(Money::from_cents(1000))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .withdraw(Money::from_cents(2500))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));

        let account = ledger.get_account(id).unwrap();
        assert_eq!(account.balance().cents(), 48500);
        assert_eq!(account.transactions().len(), 2);
        assert_eq!(account.transactions()[0].kind(), TransactionKind::Deposit);
        assert_eq!(account.transactions()[1].kind(), TransactionKind::Withdrawal);
        assert_eq!(account.ledger_balance(), account.balance());
    }

    #[test]
    fn test_failed_resync_keeps_holder_update() {
        let (mut ledger, id) = broken_ledger_with(AccountCategory::Checking, 0);

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .update_info(AccountUpdate {
                state: Some("Oregon".into()),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(ledger.get_account(id).unwrap().holder().state, "Oregon");
    }

    #[test]
    fn test_failed_resync_keeps_accrued_interest() {
        let (mut ledger, id) = broken_ledger_with(AccountCategory::Savings, 120000);

        let err = ledger
            .get_account_mut(id)
            .unwrap()
            .accrue_interest(dec!(0.06), 1)
            .unwrap_err();

        assert!(matches!(err, LedgerError::Persistence(_)));
        let account = ledger.get_account(id).unwrap();
        assert_eq!(account.balance().cents(), 120600);
        assert_eq!(account.filter_transactions(TransactionKind::Deposit).len(), 1);
    }
}
