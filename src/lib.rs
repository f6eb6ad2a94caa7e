// Bookstore - inventory manager for book records, sales and statistics
//
// This is the library crate containing the core business logic and data structures.
// The binary crate (main.rs) is a thin composition root around it.

pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::{InventoryError, Result};
pub use inventory::Inventory;
pub use models::{Book, BookstoreConfig, SaleRecord};
pub use persistence::FileManager;
pub use services::{BookStore, SalesLedger, Statistics};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
