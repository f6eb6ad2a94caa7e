use crate::error::{InventoryError, Result};
use crate::models::{Book, RecordError};
use crate::persistence::codec;
use camino::Utf8Path;
use std::collections::HashSet;

/// Insertion-ordered collection of [`Book`] records keyed by ISBN.
///
/// Lookups are linear scans. ISBN uniqueness is enforced by [`add`](Self::add),
/// [`update`](Self::update) and [`load_from_file`](Self::load_from_file); no
/// index structure is maintained.
///
/// Text queries ([`find_by_title`](Self::find_by_title) and friends) are
/// case-sensitive substring matches. An empty query matches every book.
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|b| b.isbn == isbn)
    }

    /// Append a new book. The price is stored rounded to whole cents.
    ///
    /// # Errors
    /// - [`InventoryError::InvalidInput`] if the record fails validation
    /// - [`InventoryError::DuplicateKey`] if the ISBN is already present
    pub fn add(&mut self, book: Book) -> Result<()> {
        book.validate()?;
        if self.contains(&book.isbn) {
            tracing::warn!("Rejected add: ISBN {} already exists", book.isbn);
            return Err(InventoryError::DuplicateKey(book.isbn));
        }
        let book = book.normalized();

        tracing::info!("Added book {} ({})", book.isbn, book.title);
        self.books.push(book);
        Ok(())
    }

    /// Exact, case-sensitive ISBN lookup.
    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    pub fn find_by_title(&self, query: &str) -> Vec<&Book> {
        self.filter(|b| b.title.contains(query))
    }

    pub fn find_by_author(&self, query: &str) -> Vec<&Book> {
        self.filter(|b| b.author.contains(query))
    }

    pub fn find_by_publisher(&self, query: &str) -> Vec<&Book> {
        self.filter(|b| b.publisher.contains(query))
    }

    fn filter(&self, predicate: impl Fn(&Book) -> bool) -> Vec<&Book> {
        self.books.iter().filter(|b| predicate(b)).collect()
    }

    /// Replace the record stored under `isbn` with `new_book`, keeping its
    /// position. The new record may carry a different ISBN. The price is
    /// stored rounded to whole cents.
    ///
    /// # Errors
    /// - [`InventoryError::NotFound`] if `isbn` is absent
    /// - [`InventoryError::InvalidInput`] if `new_book` fails validation
    /// - [`InventoryError::DuplicateKey`] if `new_book.isbn` belongs to another record
    pub fn update(&mut self, isbn: &str, new_book: Book) -> Result<()> {
        let Some(index) = self.position(isbn) else {
            tracing::warn!("Rejected update: ISBN {} not found", isbn);
            return Err(InventoryError::NotFound(isbn.to_string()));
        };
        new_book.validate()?;
        if new_book.isbn != isbn && self.contains(&new_book.isbn) {
            tracing::warn!(
                "Rejected update of {}: new ISBN {} already exists",
                isbn,
                new_book.isbn
            );
            return Err(InventoryError::DuplicateKey(new_book.isbn));
        }

        tracing::info!("Updated book {} -> {}", isbn, new_book.isbn);
        self.books[index] = new_book.normalized();
        Ok(())
    }

    /// Remove and return the record for `isbn`; the remaining order is kept.
    ///
    /// # Errors
    /// [`InventoryError::NotFound`] if `isbn` is absent.
    pub fn delete(&mut self, isbn: &str) -> Result<Book> {
        let Some(index) = self.position(isbn) else {
            tracing::warn!("Rejected delete: ISBN {} not found", isbn);
            return Err(InventoryError::NotFound(isbn.to_string()));
        };

        let removed = self.books.remove(index);
        tracing::info!("Deleted book {} ({})", removed.isbn, removed.title);
        Ok(removed)
    }

    /// Apply `delta` to the stock of `isbn` and return the new stock level.
    ///
    /// # Errors
    /// - [`InventoryError::NotFound`] if `isbn` is absent
    /// - [`InventoryError::InsufficientStock`] if the result would be negative
    /// - [`InventoryError::InvalidInput`] if the result overflows the stock range
    pub fn adjust_stock(&mut self, isbn: &str, delta: i64) -> Result<i32> {
        let Some(book) = self.books.iter_mut().find(|b| b.isbn == isbn) else {
            tracing::warn!("Rejected stock change: ISBN {} not found", isbn);
            return Err(InventoryError::NotFound(isbn.to_string()));
        };

        let current = i64::from(book.stock);
        let next = current.saturating_add(delta);
        if next < 0 {
            tracing::warn!(
                "Rejected stock change for {}: have {}, delta {}",
                isbn,
                current,
                delta
            );
            return Err(InventoryError::InsufficientStock {
                isbn: isbn.to_string(),
                available: current,
                requested: delta.saturating_neg(),
            });
        }
        let next = i32::try_from(next).map_err(|_| {
            InventoryError::InvalidInput(format!("stock for {isbn} would exceed {}", i32::MAX))
        })?;

        book.stock = next;
        tracing::debug!("Stock for {} changed by {} to {}", isbn, delta, next);
        Ok(next)
    }

    /// Books ordered by price, highest first. Equal prices keep insertion order.
    pub fn sorted_by_price(&self) -> Vec<&Book> {
        let mut view: Vec<&Book> = self.books.iter().collect();
        view.sort_by(|a, b| b.price.total_cmp(&a.price));
        view
    }

    /// Books ordered by stock, highest first. Equal stock keeps insertion order.
    pub fn sorted_by_stock(&self) -> Vec<&Book> {
        let mut view: Vec<&Book> = self.books.iter().collect();
        view.sort_by(|a, b| b.stock.cmp(&a.stock));
        view
    }

    pub fn stock_of(&self, isbn: &str) -> Option<i32> {
        self.find_by_isbn(isbn).map(|b| b.stock)
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.position(isbn).is_some()
    }

    /// All books in insertion order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn clear(&mut self) {
        self.books.clear();
    }

    /// Write every book as one `|`-delimited line, in insertion order.
    ///
    /// # Errors
    /// [`InventoryError::Io`] if the file cannot be created or written.
    pub fn save_to_file(&self, path: &Utf8Path) -> Result<()> {
        codec::write_records(path, &self.books, Book::to_line)?;
        tracing::info!("Saved {} books to {}", self.books.len(), path);
        Ok(())
    }

    /// Replace the whole collection with the contents of `path`.
    ///
    /// The load is all-or-nothing: on any error the current collection is left
    /// untouched. A repeated ISBN in the file counts as corruption.
    ///
    /// # Errors
    /// - [`InventoryError::Io`] if the file cannot be read
    /// - [`InventoryError::CorruptFile`] on the first malformed line
    pub fn load_from_file(&mut self, path: &Utf8Path) -> Result<usize> {
        let mut seen = HashSet::new();
        let books = codec::read_records(path, |line| {
            let book = Book::from_line(line)?;
            if !seen.insert(book.isbn.clone()) {
                return Err(RecordError::Invalid(format!("duplicate ISBN {}", book.isbn)));
            }
            Ok(book)
        })
        .inspect_err(|e| tracing::warn!("Failed to load books from {}: {}", path, e))?;

        self.books = books;
        tracing::info!("Loaded {} books from {}", self.books.len(), path);
        Ok(self.books.len())
    }
}
