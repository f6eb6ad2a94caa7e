//! File persistence for the book store and the sales ledger.
//!
//! Both files use the `|`-delimited text encoding produced by
//! [`Book::to_line`](crate::models::Book::to_line) and
//! [`SaleRecord::to_line`](crate::models::SaleRecord::to_line): one record per
//! line, price with two decimals. A malformed line fails the whole load.

pub mod codec;

use crate::error::{InventoryError, Result};
use crate::models::DataSettings;
use crate::models::book::FIELD_SEPARATOR;
use crate::services::{BookStore, SalesLedger};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

/// Header row of the exported books CSV.
pub const BOOKS_CSV_HEADER: &str = "书名,出版社,ISBN,作者,库存量,价格";

/// Header row of the exported sales CSV.
pub const SALES_CSV_HEADER: &str = "ISBN,书名,销售数量,总价格,销售时间";

/// Timestamp suffix of backup directories.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Saves, loads, backs up and exports the two data files.
#[derive(Debug, Clone)]
pub struct FileManager {
    books_path: Utf8PathBuf,
    sales_path: Utf8PathBuf,
}

impl FileManager {
    pub fn new(books_path: impl Into<Utf8PathBuf>, sales_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            sales_path: sales_path.into(),
        }
    }

    /// Build from configured file names, resolving relative ones against `base_dir`.
    pub fn from_settings(base_dir: &Utf8Path, settings: &DataSettings) -> Self {
        Self::new(
            resolve(base_dir, &settings.books_file),
            resolve(base_dir, &settings.sales_file),
        )
    }

    pub fn books_path(&self) -> &Utf8Path {
        &self.books_path
    }

    pub fn sales_path(&self) -> &Utf8Path {
        &self.sales_path
    }

    /// True when at least one data file exists on disk.
    pub fn has_saved_data(&self) -> bool {
        self.books_path.exists() || self.sales_path.exists()
    }

    /// Save both collections. Both writes are attempted; the first error is returned.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if either file cannot be written.
    pub fn save_all(&self, store: &BookStore, ledger: &SalesLedger) -> Result<()> {
        let books = store.save_to_file(&self.books_path);
        let sales = ledger.save_to_file(&self.sales_path);

        if let Err(e) = &books {
            tracing::warn!("Book data was not saved: {}", e);
        }
        if let Err(e) = &sales {
            tracing::warn!("Sales data was not saved: {}", e);
        }
        books.and(sales)?;

        tracing::info!("All data saved");
        Ok(())
    }

    /// Load both files, replacing both collections only if both decode.
    ///
    /// A missing file loads as an empty collection.
    ///
    /// # Errors
    /// [`InventoryError::Io`] or [`InventoryError::CorruptFile`] from either
    /// file; neither collection is modified in that case.
    pub fn load_all(&self, store: &mut BookStore, ledger: &mut SalesLedger) -> Result<(usize, usize)> {
        let mut new_store = BookStore::new();
        if self.books_path.exists() {
            new_store.load_from_file(&self.books_path)?;
        }
        let mut new_ledger = SalesLedger::new();
        if self.sales_path.exists() {
            new_ledger.load_from_file(&self.sales_path)?;
        }

        *store = new_store;
        *ledger = new_ledger;
        tracing::info!(
            "All data loaded: {} books, {} sale records",
            store.len(),
            ledger.len()
        );
        Ok((store.len(), ledger.len()))
    }

    /// Copy each existing data file into a new `backup_YYYYMMDD_HHMMSS`
    /// directory under `backup_root`. The originals are not modified.
    ///
    /// Returns the backup directory.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if the directory cannot be created or a copy fails.
    pub fn backup(&self, backup_root: &Utf8Path) -> Result<Utf8PathBuf> {
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let target = backup_root.join(format!("backup_{timestamp}"));
        fs::create_dir_all(&target).map_err(|e| InventoryError::io(&target, e))?;

        for source in [&self.books_path, &self.sales_path] {
            if !source.exists() {
                tracing::debug!("Skipping backup of missing file {}", source);
                continue;
            }
            let Some(name) = source.file_name() else {
                continue;
            };
            let destination = target.join(name);
            fs::copy(source, &destination).map_err(|e| InventoryError::io(source, e))?;
            tracing::info!("Backed up {} to {}", source, destination);
        }

        Ok(target)
    }

    /// Convert the saved books file to CSV with a header row.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if the books file cannot be read or the CSV written.
    pub fn export_books_csv(&self, csv_path: &Utf8Path) -> Result<usize> {
        let rows = export_csv(&self.books_path, csv_path, BOOKS_CSV_HEADER)?;
        tracing::info!("Exported {} books to {}", rows, csv_path);
        Ok(rows)
    }

    /// Convert the saved sales file to CSV with a header row.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if the sales file cannot be read or the CSV written.
    pub fn export_sales_csv(&self, csv_path: &Utf8Path) -> Result<usize> {
        let rows = export_csv(&self.sales_path, csv_path, SALES_CSV_HEADER)?;
        tracing::info!("Exported {} sale records to {}", rows, csv_path);
        Ok(rows)
    }
}

/// Resolve `path` against `base_dir` unless it is already absolute.
pub fn resolve(base_dir: &Utf8Path, path: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn export_csv(source: &Utf8Path, csv_path: &Utf8Path, header: &str) -> Result<usize> {
    let contents = fs::read_to_string(source).map_err(|e| InventoryError::io(source, e))?;
    let file = File::create(csv_path).map_err(|e| InventoryError::io(csv_path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{header}").map_err(|e| InventoryError::io(csv_path, e))?;
    let mut rows = 0;
    for line in contents.lines().filter(|l| !l.trim().is_empty()) {
        writeln!(writer, "{}", line.replace(FIELD_SEPARATOR, ","))
            .map_err(|e| InventoryError::io(csv_path, e))?;
        rows += 1;
    }
    writer.flush().map_err(|e| InventoryError::io(csv_path, e))?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Utf8Path::new("/data");
        assert_eq!(resolve(base, "books.txt"), Utf8PathBuf::from("/data/books.txt"));

        let absolute = if cfg!(windows) { "C:\\store\\b.txt" } else { "/store/b.txt" };
        assert_eq!(resolve(base, absolute), Utf8PathBuf::from(absolute));
    }

    #[test]
    fn test_from_settings() {
        let manager = FileManager::from_settings(Utf8Path::new("data"), &DataSettings::default());
        assert_eq!(manager.books_path(), Utf8Path::new("data/books.txt"));
        assert_eq!(manager.sales_path(), Utf8Path::new("data/sales.txt"));
    }
}
