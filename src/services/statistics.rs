use super::book_store::BookStore;
use super::sales::SalesLedger;
use crate::models::Book;
use indexmap::IndexMap;
use std::fmt;

/// Price aggregates over the whole store. All zero for an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceStats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub total_value: f64,
}

/// Stock aggregates over the whole store. All zero for an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockStats {
    pub total_titles: usize,
    pub total_stock: i64,
    pub max: i32,
    pub min: i32,
    pub avg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesSummary {
    pub record_count: usize,
    pub total_sales: f64,
}

/// Snapshot of every aggregate, rendered by its `Display` impl.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub stock: StockStats,
    pub price: PriceStats,
    pub sales: Option<SalesSummary>,
}

/// Read-only aggregations over a [`BookStore`] and, optionally, a
/// [`SalesLedger`].
///
/// Nothing is cached: each call walks the current contents of the store.
/// Groupings use exact, case-sensitive keys and list groups in the order their
/// key first appears in the store.
#[derive(Debug, Clone, Copy)]
pub struct Statistics<'a> {
    store: &'a BookStore,
    ledger: Option<&'a SalesLedger>,
}

impl<'a> Statistics<'a> {
    pub fn new(store: &'a BookStore) -> Self {
        Self {
            store,
            ledger: None,
        }
    }

    /// Include sales figures from `ledger` in the report.
    pub fn with_ledger(store: &'a BookStore, ledger: &'a SalesLedger) -> Self {
        Self {
            store,
            ledger: Some(ledger),
        }
    }

    /// Number of distinct titles (records) in the store.
    pub fn total_books(&self) -> usize {
        self.store.len()
    }

    /// Units on hand across all titles.
    pub fn total_stock(&self) -> i64 {
        self.store.all().iter().map(|b| i64::from(b.stock)).sum()
    }

    /// Σ price × stock.
    pub fn total_value(&self) -> f64 {
        self.store.all().iter().map(Book::value).sum()
    }

    pub fn average_price(&self) -> f64 {
        self.price_stats().avg
    }

    pub fn average_stock(&self) -> f64 {
        self.stock_stats().avg
    }

    pub fn price_stats(&self) -> PriceStats {
        let books = self.store.all();
        let Some(first) = books.first() else {
            return PriceStats::default();
        };

        let mut stats = PriceStats {
            max: first.price,
            min: first.price,
            ..PriceStats::default()
        };
        let mut sum = 0.0;
        for book in books {
            sum += book.price;
            stats.total_value += book.value();
            stats.max = stats.max.max(book.price);
            stats.min = stats.min.min(book.price);
        }
        stats.avg = sum / books.len() as f64;
        stats
    }

    pub fn stock_stats(&self) -> StockStats {
        let books = self.store.all();
        let Some(first) = books.first() else {
            return StockStats::default();
        };

        let mut stats = StockStats {
            total_titles: books.len(),
            max: first.stock,
            min: first.stock,
            ..StockStats::default()
        };
        for book in books {
            stats.total_stock += i64::from(book.stock);
            stats.max = stats.max.max(book.stock);
            stats.min = stats.min.min(book.stock);
        }
        stats.avg = stats.total_stock as f64 / books.len() as f64;
        stats
    }

    pub fn group_by_author(&self) -> IndexMap<String, Vec<&'a Book>> {
        self.group_by(|b| &b.author)
    }

    pub fn group_by_publisher(&self) -> IndexMap<String, Vec<&'a Book>> {
        self.group_by(|b| &b.publisher)
    }

    fn group_by(&self, key: impl Fn(&Book) -> &String) -> IndexMap<String, Vec<&'a Book>> {
        let mut groups: IndexMap<String, Vec<&'a Book>> = IndexMap::new();
        for book in self.store.all() {
            groups.entry(key(book).clone()).or_default().push(book);
        }
        groups
    }

    /// First entry of the price-descending view, `None` for an empty store.
    pub fn most_expensive_book(&self) -> Option<&'a Book> {
        self.store.sorted_by_price().first().copied()
    }

    /// First entry of the stock-descending view, `None` for an empty store.
    pub fn highest_stock_book(&self) -> Option<&'a Book> {
        self.store.sorted_by_stock().first().copied()
    }

    /// Sales figures, when a ledger was supplied.
    pub fn sales_summary(&self) -> Option<SalesSummary> {
        self.ledger.map(|ledger| SalesSummary {
            record_count: ledger.len(),
            total_sales: ledger.total_sales(),
        })
    }

    pub fn report(&self) -> InventoryReport {
        InventoryReport {
            stock: self.stock_stats(),
            price: self.price_stats(),
            sales: self.sales_summary(),
        }
    }
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Inventory Report ===")?;
        writeln!(f, "Titles: {}", self.stock.total_titles)?;
        writeln!(f, "Total stock: {}", self.stock.total_stock)?;
        writeln!(f, "Max stock: {}", self.stock.max)?;
        writeln!(f, "Min stock: {}", self.stock.min)?;
        writeln!(f, "Average stock: {:.1}", self.stock.avg)?;
        writeln!(f, "Max price: {:.2}", self.price.max)?;
        writeln!(f, "Min price: {:.2}", self.price.min)?;
        writeln!(f, "Average price: {:.2}", self.price.avg)?;
        write!(f, "Inventory value: {:.2}", self.price.total_value)?;
        if let Some(sales) = &self.sales {
            writeln!(f)?;
            writeln!(f, "Sale records: {}", sales.record_count)?;
            write!(f, "Total sales: {:.2}", sales.total_sales)?;
        }
        Ok(())
    }
}
