//! Bookstore - inventory manager
//!
//! Main entry point.
//!
//! # Execution Flow
//!
//! 1. Open the data directory (`$BOOKSTORE_DATA`, default `Bookstore Data/`)
//! 2. Load `bookstore.yaml` (defaults when absent)
//! 3. Initialize logging → `<log_dir>/<log_prefix>.<date>`
//! 4. Load `books.txt` / `sales.txt` into the [`Inventory`]
//! 5. Log the inventory report
//! 6. Save both data files back
//!
//! Interactive front ends build on the same [`Inventory`] API.

use anyhow::{Context, Result};
use bookstore::{APP_NAME, ConfigManager, Inventory, VERSION};

/// Data directory used when `BOOKSTORE_DATA` is not set.
const DEFAULT_DATA_DIR: &str = "Bookstore Data";

fn main() -> Result<()> {
    let data_dir = std::env::var("BOOKSTORE_DATA").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let config_manager = ConfigManager::new(&data_dir)?;
    let config = config_manager.load_config()?;

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = bookstore::logging::setup_logging(&config.logging, config_manager.config_dir())?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let mut inventory = Inventory::new(config_manager.file_manager(&config));
    if inventory.files().has_saved_data() {
        let (books, sales) = inventory
            .load()
            .context("Failed to load saved inventory")?;
        tracing::info!("Loaded {} books and {} sale records", books, sales);
    } else {
        tracing::warn!(
            "No saved data in {}, starting with an empty inventory",
            config_manager.config_dir()
        );
    }

    let report = inventory.statistics().report();
    tracing::info!("\n{}", report);

    inventory.save().context("Failed to save inventory")?;

    tracing::info!("Shutdown complete");
    Ok(())
}
