use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by the book store, sales ledger and persistence layer.
///
/// Every failing operation leaves in-memory state exactly as it was before the
/// call.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("ISBN {0} already exists")]
    DuplicateKey(String),

    #[error("ISBN {0} not found")]
    NotFound(String),

    #[error("Insufficient stock for ISBN {isbn}: available {available}, requested {requested}")]
    InsufficientStock {
        isbn: String,
        available: i64,
        requested: i64,
    },

    #[error("Invalid quantity {0}: must be greater than 0")]
    InvalidQuantity(i32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt file {path} at line {line}: {reason}")]
    CorruptFile {
        path: Utf8PathBuf,
        line: usize,
        reason: String,
    },
}

impl InventoryError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, InventoryError>;
