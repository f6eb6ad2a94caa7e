//! Data models for the bookstore.
//!
//! - [`Book`]: an inventory record keyed by ISBN
//! - [`SaleRecord`]: an immutable snapshot of one purchase
//! - [`BookstoreConfig`]: file locations and logging settings loaded from `bookstore.yaml`
//!
//! Prices and sale totals are held in whole cents ([`round_to_cents`]), the
//! precision of the text files, so a saved record reads back unchanged.
//! Both record types carry their own line codec (`to_line` / `from_line`) for
//! the `|`-delimited text files written by [`FileManager`](crate::persistence::FileManager).

pub mod book;
pub mod config;
pub mod sale;

pub use book::{Book, MAX_AMOUNT, RecordError, round_to_cents};
pub use config::{BookstoreConfig, DataSettings, LogSettings};
pub use sale::SaleRecord;
