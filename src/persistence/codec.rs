//! Line-oriented reader and writer shared by the book and sales files.
//!
//! Each file is opened, fully read or written, and closed within one call.
//! Reads decode into a fresh `Vec` so a failure never leaks half a file into
//! the caller's state.

use crate::error::{InventoryError, Result};
use crate::models::RecordError;
use camino::Utf8Path;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};

/// Write one encoded line per record, replacing any existing file.
pub fn write_records<T>(
    path: &Utf8Path,
    records: &[T],
    encode: impl Fn(&T) -> String,
) -> Result<()> {
    let file = File::create(path).map_err(|e| InventoryError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writeln!(writer, "{}", encode(record)).map_err(|e| InventoryError::io(path, e))?;
    }

    writer.flush().map_err(|e| InventoryError::io(path, e))?;
    Ok(())
}

/// Decode every non-blank line of `path`.
///
/// The first line that fails to decode aborts the read with
/// [`InventoryError::CorruptFile`] carrying its 1-based line number.
pub fn read_records<T>(
    path: &Utf8Path,
    mut decode: impl FnMut(&str) -> std::result::Result<T, RecordError>,
) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            InventoryError::CorruptFile {
                path: path.to_path_buf(),
                line: 0,
                reason: "file is not valid UTF-8".to_string(),
            }
        } else {
            InventoryError::io(path, e)
        }
    })?;

    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = decode(line).map_err(|e| InventoryError::CorruptFile {
            path: path.to_path_buf(),
            line: index + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}
