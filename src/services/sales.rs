use super::book_store::BookStore;
use crate::error::{InventoryError, Result};
use crate::models::{Book, MAX_AMOUNT, SaleRecord};
use crate::persistence::codec;
use camino::Utf8Path;

/// Ordered record of completed purchases.
///
/// The ledger owns only its records. The [`BookStore`] it sells from is passed
/// in by the caller on each purchase, so the ledger never outlives or owns the
/// store; [`Inventory`](crate::Inventory) is the usual owner of both.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    records: Vec<SaleRecord>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sell `quantity` copies of `isbn` out of `store`.
    ///
    /// On success the store's stock drops by exactly `quantity` and one
    /// [`SaleRecord`] priced at the book's current price is appended and
    /// returned. On failure neither the store nor the ledger changes.
    ///
    /// # Errors
    /// - [`InventoryError::InvalidQuantity`] if `quantity <= 0`
    /// - [`InventoryError::NotFound`] if the store has no such ISBN
    /// - [`InventoryError::InsufficientStock`] if stock is below `quantity`
    /// - [`InventoryError::InvalidInput`] if the total would exceed [`MAX_AMOUNT`]
    pub fn purchase(
        &mut self,
        store: &mut BookStore,
        isbn: &str,
        quantity: i32,
    ) -> Result<SaleRecord> {
        let (title, price) = {
            let book = Self::check_available(store, isbn, quantity)?;
            (book.title.clone(), book.price)
        };

        store.adjust_stock(isbn, -i64::from(quantity))?;

        let units = quantity.unsigned_abs();
        let record = SaleRecord::new(isbn, title, units, price);
        tracing::info!(
            "Sold {} x {} ({}) for {:.2}",
            record.quantity,
            record.isbn,
            record.book_title,
            record.total_price
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Price a purchase without performing it.
    ///
    /// # Errors
    /// Same conditions as [`purchase`](Self::purchase).
    pub fn quote(store: &BookStore, isbn: &str, quantity: i32) -> Result<f64> {
        let book = Self::check_available(store, isbn, quantity)?;
        Ok(f64::from(quantity) * book.price)
    }

    fn check_available<'s>(
        store: &'s BookStore,
        isbn: &str,
        quantity: i32,
    ) -> Result<&'s Book> {
        if quantity <= 0 {
            tracing::warn!("Rejected purchase of {}: quantity {}", isbn, quantity);
            return Err(InventoryError::InvalidQuantity(quantity));
        }

        let Some(book) = store.find_by_isbn(isbn) else {
            tracing::warn!("Rejected purchase: ISBN {} not found", isbn);
            return Err(InventoryError::NotFound(isbn.to_string()));
        };

        if book.stock < quantity {
            tracing::warn!(
                "Rejected purchase of {}: stock {}, requested {}",
                isbn,
                book.stock,
                quantity
            );
            return Err(InventoryError::InsufficientStock {
                isbn: isbn.to_string(),
                available: i64::from(book.stock),
                requested: i64::from(quantity),
            });
        }

        let total = f64::from(quantity) * book.price;
        if total > MAX_AMOUNT {
            tracing::warn!("Rejected purchase of {}: total {:.2} too large", isbn, total);
            return Err(InventoryError::InvalidInput(format!(
                "sale total must not exceed {MAX_AMOUNT} (got {total:.2})"
            )));
        }

        Ok(book)
    }

    /// Sum of every record's total price.
    pub fn total_sales(&self) -> f64 {
        self.records.iter().map(|r| r.total_price).sum()
    }

    pub fn records_by_isbn(&self, isbn: &str) -> Vec<&SaleRecord> {
        self.records.iter().filter(|r| r.isbn == isbn).collect()
    }

    /// All records in the order the sales happened.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write every record as one `|`-delimited line.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if the file cannot be created or written.
    pub fn save_to_file(&self, path: &Utf8Path) -> Result<()> {
        codec::write_records(path, &self.records, SaleRecord::to_line)?;
        tracing::info!("Saved {} sale records to {}", self.records.len(), path);
        Ok(())
    }

    /// Replace the ledger with the contents of `path`; all-or-nothing.
    ///
    /// # Errors
    /// - [`InventoryError::Io`] if the file cannot be read
    /// - [`InventoryError::CorruptFile`] on the first malformed line
    pub fn load_from_file(&mut self, path: &Utf8Path) -> Result<usize> {
        let records = codec::read_records(path, SaleRecord::from_line)
            .inspect_err(|e| tracing::warn!("Failed to load sales from {}: {}", path, e))?;

        self.records = records;
        tracing::info!("Loaded {} sale records from {}", self.records.len(), path);
        Ok(self.records.len())
    }
}
