//! Transaction display formatting
//!
//! Renders single log entries as register rows. Transfer rows name the other
//! account when it still exists in the ledger.

use crate::models::Transaction;
use crate::services::Ledger;
use crate::storage::SnapshotSink;

/// Format a single transaction for display (register row)
pub fn format_transaction_row<S: SnapshotSink>(
    ledger: &Ledger<S>,
    txn: &Transaction,
    symbol: &str,
) -> String {
    let counterparty = if txn.kind().is_transfer() {
        match ledger.counterparty(txn) {
            Some(account) => account.holder().full_name(),
            None => "unknown".to_string(),
        }
    } else {
        String::new()
    };

    format!(
        "{} {:<12} {:>12}  {:<20} {}",
        txn.recorded_at().format("%Y-%m-%d"),
        txn.kind().to_string(),
        txn.signed_amount().format_with_symbol(symbol),
        truncate(&counterparty, 20),
        txn.id()
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
