//! Storage layer for the bank ledger
//!
//! Provides the account snapshot sinks and the CSV file helpers behind them.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_csv, write_csv_atomic};
pub use snapshot::{
    AccountRecord, CsvSnapshotStore, MemorySnapshotStore, SnapshotSink, ACCOUNT_COLUMNS,
};
