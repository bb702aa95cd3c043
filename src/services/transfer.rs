//! Transfer service
//!
//! Transfers are the one operation touching two accounts. Both sides are
//! validated before anything moves, then the outflow and inflow entries are
//! recorded together and the mirror is resynced once.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, Money, TransferResult};
use crate::storage::SnapshotSink;

use super::ledger::Ledger;

impl<S: SnapshotSink> Ledger<S> {
    /// Move `amount` from one account to another
    ///
    /// On error neither balance nor either log has changed. The target
    /// balance is not bounded.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        if !self.contains(from) {
            return Err(LedgerError::account_not_found(from));
        }
        if !self.contains(to) {
            return Err(LedgerError::account_not_found(to));
        }
        if from == to {
            return Err(LedgerError::Validation(
                "Cannot transfer to the same account".into(),
            ));
        }

        // The target is held outside the map so both sides can be borrowed
        // mutably; it goes back in before any error is returned.
        let mut target = self.take_out(to)?;
        let result = self
            .account_entry(from)
            .and_then(|source| source.transfer(&mut target, amount));
        self.put_back(target);
        let result = result?;

        info!(from = %from, to = %to, amount = %amount, "transferred funds");
        self.export_snapshot()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LedgerError;
    use crate::models::{AccountCategory, AccountId, Holder, Money, TransactionKind};
    use crate::services::Ledger;
    use crate::error::LedgerResult;
    use crate::storage::{AccountRecord, MemorySnapshotStore, SnapshotSink};

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

    fn setup() -> (Ledger<MemorySnapshotStore>, AccountId, AccountId) {
        let mut ledger = Ledger::new(MemorySnapshotStore::new());
        let a = ledger
            .create_account(
                Holder::new("John", "Doe", 30, "California", "Employed"),
                AccountCategory::Checking,
                Money::from_cents(50000),
            )
            .unwrap();
        let b = ledger
            .create_account(
                Holder::new("Jane", "Doe", 28, "Nevada", "Unemployed"),
                AccountCategory::Savings,
                Money::from_cents(30000),
            )
            .unwrap();
        (ledger, a, b)
    }

    fn assert_untouched(ledger: &Ledger<MemorySnapshotStore>, a: AccountId, b: AccountId) {
        let source = ledger.get_account(a).unwrap();
        let target = ledger.get_account(b).unwrap();
        assert_eq!(source.balance().cents(), 50000);
        assert_eq!(target.balance().cents(), 30000);
        assert!(source.transactions().is_empty());
        assert!(target.transactions().is_empty());
        assert_eq!(ledger.sink().write_count(), 2);
    }

    #[test]
    fn test_transfer_moves_funds_and_logs_both_sides() {
        let (mut ledger, a, b) = setup();

        let result = ledger.transfer(a, b, Money::from_cents(20000)).unwrap();

        let source = ledger.get_account(a).unwrap();
        let target = ledger.get_account(b).unwrap();
        assert_eq!(source.balance().cents(), 30000);
        assert_eq!(target.balance().cents(), 50000);

        let out = source.filter_transactions(TransactionKind::TransferOut);
        let inbound = target.filter_transactions(TransactionKind::TransferIn);
        assert_eq!(out.len(), 1);
        assert_eq!(inbound.len(), 1);
        assert_eq!(out[0].counterparty(), Some(b));
        assert_eq!(inbound[0].counterparty(), Some(a));
        assert_eq!(out[0].amount().cents(), 20000);

        assert_eq!(result.from_transaction.id(), out[0].id());
        assert_eq!(result.to_transaction.id(), inbound[0].id());

        assert_eq!(ledger.sink().write_count(), 3);
        let rows = ledger.sink().records();
        assert_eq!(rows[0].balance, "300.00");
        assert_eq!(rows[1].balance, "500.00");
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let (mut ledger, a, b) = setup();
        let err = ledger.transfer(a, b, Money::from_cents(60000)).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_untouched(&ledger, a, b);
    }

    #[test]
    fn test_transfer_invalid_amount() {
        let (mut ledger, a, b) = setup();
        let err = ledger.transfer(a, b, Money::zero()).unwrap_err();

        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_untouched(&ledger, a, b);
    }

    #[test]
    fn test_transfer_unknown_accounts() {
        let (mut ledger, a, b) = setup();

        let err = ledger
            .transfer(a, AccountId::new(), Money::from_cents(100))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = ledger
            .transfer(AccountId::new(), b, Money::from_cents(100))
            .unwrap_err();
        assert!(err.is_not_found());

        assert_untouched(&ledger, a, b);
    }

    #[test]
    fn test_transfer_to_same_account() {
        let (mut ledger, a, b) = setup();
        let err = ledger.transfer(a, a, Money::from_cents(100)).unwrap_err();

        assert!(err.is_validation());
        assert_untouched(&ledger, a, b);
    }

    #[test]
    fn test_transfer_via_handle() {
        let (mut ledger, a, b) = setup();
        ledger
            .get_account_mut(b)
            .unwrap()
            .transfer(a, Money::from_cents(30000))
            .unwrap();

        assert!(ledger.get_account(b).unwrap().balance().is_zero());
        assert_eq!(ledger.get_account(a).unwrap().balance().cents(), 80000);
        assert_eq!(ledger.list_accounts().len(), 2);
    }

    #[test]
    fn test_failed_resync_keeps_both_sides_of_transfer() {
        let mut ledger = Ledger::new(BrokenSink);
        for (first, cents) in [("John", 50000), ("Jane", 30000)] {
            let result = ledger.create_account(
                Holder::new(first, "Doe", 30, "California", "Employed"),
                AccountCategory::Checking,
                Money::from_cents(cents),
            );
            assert!(matches!(result, Err(LedgerError::Persistence(_))));
        }
        let ids: Vec<AccountId> = ledger.list_accounts().iter().map(|s| s.id).collect();
        let (a, b) = (ids[0], ids[1]);

        let err = ledger.transfer(a, b, Money::from_cents(20000)).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));

        let source = ledger.get_account(a).unwrap();
        let target = ledger.get_account(b).unwrap();
        assert_eq!(source.balance().cents(), 30000);
        assert_eq!(target.balance().cents(), 50000);

        let out = source.filter_transactions(TransactionKind::TransferOut);
        let inbound = target.filter_transactions(TransactionKind::TransferIn);
        assert_eq!(out.len(), 1);
        assert_eq!(inbound.len(), 1);
        assert_eq!(out[0].counterparty(), Some(b));
        assert_eq!(inbound[0].counterparty(), Some(a));
    }

    #[test]
    fn test_transfer_overflow_through_ledger() {
        let mut ledger = Ledger::new(MemorySnapshotStore::new());
        let a = ledger
            .create_account(
                Holder::new("John", "Doe", 30, "California", "Employed"),
                AccountCategory::Checking,
                Money::from_cents(i64::MAX),
            )
            .unwrap();
        let b = ledger
            .create_account(
                Holder::new("Jane", "Doe", 28, "Nevada", "Unemployed"),
                AccountCategory::Savings,
                Money::from_cents(100),
            )
            .unwrap();

        let err = ledger.transfer(a, b, Money::from_cents(i64::MAX)).unwrap_err();

        assert!(matches!(err, LedgerError::BalanceOverflow { .. }));
        assert_eq!(ledger.get_account(a).unwrap().balance().cents(), i64::MAX);
        assert_eq!(ledger.get_account(b).unwrap().balance().cents(), 100);
        assert_eq!(ledger.sink().write_count(), 2);
    }
}
