// Inventory composition root
//
// Owns the book store and the sales ledger side by side so that purchases can
// borrow both at once, and wires them to the file manager.

use crate::error::Result;
use crate::models::SaleRecord;
use crate::persistence::FileManager;
use crate::services::{BookStore, SalesLedger, Statistics};
use camino::{Utf8Path, Utf8PathBuf};

/// Owner of the [`BookStore`] and [`SalesLedger`].
///
/// The ledger never holds the store; [`purchase`](Self::purchase) lends it the
/// store for the duration of one call. Dropping the inventory drops both.
#[derive(Debug, Clone)]
pub struct Inventory {
    books: BookStore,
    sales: SalesLedger,
    files: FileManager,
}

impl Inventory {
    /// Create an empty inventory persisted through `files`.
    pub fn new(files: FileManager) -> Self {
        Self {
            books: BookStore::new(),
            sales: SalesLedger::new(),
            files,
        }
    }

    pub fn books(&self) -> &BookStore {
        &self.books
    }

    /// Mutable access for add/update/delete/stock adjustments.
    pub fn books_mut(&mut self) -> &mut BookStore {
        &mut self.books
    }

    pub fn sales(&self) -> &SalesLedger {
        &self.sales
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    /// Sell `quantity` copies of `isbn`; see [`SalesLedger::purchase`].
    pub fn purchase(&mut self, isbn: &str, quantity: i32) -> Result<SaleRecord> {
        self.sales.purchase(&mut self.books, isbn, quantity)
    }

    /// Discard every sale record. Book stock is not restored.
    pub fn clear_sales(&mut self) {
        self.sales.clear();
        tracing::info!("Sales ledger cleared");
    }

    /// Aggregates over the current books and sales.
    pub fn statistics(&self) -> Statistics<'_> {
        Statistics::with_ledger(&self.books, &self.sales)
    }

    pub fn save(&self) -> Result<()> {
        self.files.save_all(&self.books, &self.sales)
    }

    /// Replace books and sales from disk; all-or-nothing across both files.
    pub fn load(&mut self) -> Result<(usize, usize)> {
        self.files.load_all(&mut self.books, &mut self.sales)
    }

    /// Copy the saved data files into a timestamped directory under `backup_root`.
    ///
    /// Unsaved in-memory changes are not part of the backup.
    pub fn backup(&self, backup_root: &Utf8Path) -> Result<Utf8PathBuf> {
        self.files.backup(backup_root)
    }

    /// Write CSV exports of the saved data files. Returns the number of book
    /// and sale rows.
    pub fn export_csv(&self, books_csv: &Utf8Path, sales_csv: &Utf8Path) -> Result<(usize, usize)> {
        let books = self.files.export_books_csv(books_csv)?;
        let sales = self.files.export_sales_csv(sales_csv)?;
        Ok((books, sales))
    }
}
