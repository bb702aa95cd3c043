//! File I/O utilities with atomic writes
//!
//! Provides CSV file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

/// Read every row of a CSV file
///
/// If the file doesn't exist yet it is created with just the header row,
/// and an empty list is returned.
pub fn read_csv<T, P>(path: P, header: &[&str]) -> Result<Vec<T>, LedgerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        write_csv_atomic::<(), _>(path, header, &[])?;
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| {
        LedgerError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    csv::Reader::from_reader(BufReader::new(file))
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| LedgerError::Persistence(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a header and rows to a CSV file atomically (write to temp, then rename)
///
/// The file is either completely replaced or not modified at all.
pub fn write_csv_atomic<T, P>(path: P, header: &[&str], rows: &[T]) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Persistence(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = write_rows(&temp_path, header, rows).and_then(|_| {
        fs::rename(&temp_path, path)
            .map_err(|e| LedgerError::Persistence(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_rows<T: Serialize>(temp_path: &Path, header: &[&str], rows: &[T]) -> Result<(), LedgerError> {
    let file = File::create(temp_path)
        .map_err(|e| LedgerError::Persistence(format!("Failed to create temp file: {}", e)))?;

    // Header is written by hand so an empty table still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| LedgerError::Persistence(format!("Failed to flush data: {}", e)))?;
    inner
        .flush()
        .map_err(|e| LedgerError::Persistence(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Persistence(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
