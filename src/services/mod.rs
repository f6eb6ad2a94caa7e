//! Services module - business logic over the in-memory book and sale records.
//!
//! # Components
//!
//! - [`BookStore`]: insertion-ordered book records with ISBN-keyed CRUD, substring
//!   queries, stock adjustment and price/stock sorted views
//! - [`SalesLedger`]: purchase workflow (validate, decrement stock, record sale) and
//!   sales totals
//! - [`Statistics`]: read-only aggregates recomputed on every call
//!
//! Everything here is single-threaded and synchronous. Every failing operation
//! returns an [`InventoryError`](crate::InventoryError) and leaves state unchanged.

pub mod book_store;
pub mod sales;
pub mod statistics;

pub use book_store::BookStore;
pub use sales::SalesLedger;
pub use statistics::{InventoryReport, PriceStats, SalesSummary, Statistics, StockStats};
