use crate::error::{InventoryError, Result};
use std::fmt;
use thiserror::Error;

/// Field separator of the delimited text encoding.
pub const FIELD_SEPARATOR: char = '|';

/// Number of fields in a serialized [`Book`] line.
pub const BOOK_FIELD_COUNT: usize = 6;

/// Largest price or sale total accepted. Up to this bound a whole-cent amount
/// survives the two-decimal text encoding unchanged.
pub const MAX_AMOUNT: f64 = 1e12;

/// Round `amount` to whole cents, the precision written to the data files.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Reasons a single persisted line fails to decode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

/// A book record as held by the [`BookStore`](crate::services::BookStore).
///
/// The ISBN is the unique key; every other field is replaced wholesale on
/// update.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub publisher: String,
    pub isbn: String,
    pub author: String,
    pub stock: i32,
    pub price: f64,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        publisher: impl Into<String>,
        isbn: impl Into<String>,
        author: impl Into<String>,
        stock: i32,
        price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            publisher: publisher.into(),
            isbn: isbn.into(),
            author: author.into(),
            stock,
            price,
        }
    }

    /// The same record with its price rounded to whole cents, as it will read
    /// back from a saved file.
    pub fn normalized(self) -> Self {
        Self {
            price: round_to_cents(self.price),
            ..self
        }
    }

    /// Inventory value of this record (`price × stock`).
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }

    /// Check the record can be stored and persisted.
    ///
    /// # Errors
    /// Returns [`InventoryError::InvalidInput`] when the ISBN is empty, stock or
    /// price is negative, the price is not finite or exceeds [`MAX_AMOUNT`], or
    /// a text field contains the field separator or a line break.
    pub fn validate(&self) -> Result<()> {
        if self.isbn.is_empty() {
            return Err(InventoryError::InvalidInput("ISBN must not be empty".into()));
        }
        if self.stock < 0 {
            return Err(InventoryError::InvalidInput(format!(
                "stock must not be negative (got {})",
                self.stock
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InventoryError::InvalidInput(format!(
                "price must be a non-negative number (got {})",
                self.price
            )));
        }
        if self.price > MAX_AMOUNT {
            return Err(InventoryError::InvalidInput(format!(
                "price must not exceed {MAX_AMOUNT} (got {})",
                self.price
            )));
        }
        for (name, value) in [
            ("title", &self.title),
            ("publisher", &self.publisher),
            ("isbn", &self.isbn),
            ("author", &self.author),
        ] {
            if !is_storable_text(value) {
                return Err(InventoryError::InvalidInput(format!(
                    "{name} must not contain '{FIELD_SEPARATOR}' or line breaks"
                )));
            }
        }
        Ok(())
    }

    /// Encode as one `title|publisher|isbn|author|stock|price` line, price with
    /// two decimals.
    pub fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{:.2}",
            self.title, self.publisher, self.isbn, self.author, self.stock, self.price
        )
    }

    /// Decode a line produced by [`Book::to_line`].
    ///
    /// # Errors
    /// Fails when the field count is not exactly six, stock or price does not
    /// parse, or the decoded record does not pass [`Book::validate`].
    pub fn from_line(line: &str) -> std::result::Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [title, publisher, isbn, author, stock, price] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                expected: BOOK_FIELD_COUNT,
                found: fields.len(),
            });
        };

        let stock = stock.trim().parse::<i32>().map_err(|_| RecordError::InvalidNumber {
            field: "stock",
            value: (*stock).to_string(),
        })?;
        let price = price.trim().parse::<f64>().map_err(|_| RecordError::InvalidNumber {
            field: "price",
            value: (*price).to_string(),
        })?;

        let book = Self::new(*title, *publisher, *isbn, *author, stock, price);
        book.validate()
            .map_err(|e| RecordError::Invalid(e.to_string()))?;
        Ok(book.normalized())
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISBN: {}, Title: {}, Author: {}, Publisher: {}, Stock: {}, Price: {:.2}",
            self.isbn, self.title, self.author, self.publisher, self.stock, self.price
        )
    }
}

pub(crate) fn is_storable_text(value: &str) -> bool {
    !value.contains([FIELD_SEPARATOR, '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book::new("Rust in Action", "Manning", "978-1617294556", "McNamara", 12, 39.99)
    }

    #[test]
    fn test_to_line_uses_two_decimal_price() {
        let book = Book::new("A", "Pub1", "111", "Auth1", 5, 10.0);
        assert_eq!(book.to_line(), "A|Pub1|111|Auth1|5|10.00");
    }

    #[test]
    fn test_line_round_trip() {
        let book = sample();
        let decoded = Book::from_line(&book.to_line()).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_from_line_wrong_field_count() {
        let err = Book::from_line("A|Pub1|111|Auth1|5").unwrap_err();
        assert_eq!(
            err,
            RecordError::FieldCount {
                expected: 6,
                found: 5
            }
        );

        let err = Book::from_line("A|Pub1|111|Auth1|5|1.00|extra").unwrap_err();
        assert!(matches!(err, RecordError::FieldCount { found: 7, .. }));
    }

    #[test]
    fn test_from_line_non_numeric_fields() {
        let err = Book::from_line("A|Pub1|111|Auth1|five|1.00").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { field: "stock", .. }));

        let err = Book::from_line("A|Pub1|111|Auth1|5|cheap").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { field: "price", .. }));
    }

    #[test]
    fn test_from_line_rejects_negative_stock() {
        let err = Book::from_line("A|Pub1|111|Auth1|-1|1.00").unwrap_err();
        assert!(matches!(err, RecordError::Invalid(_)));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut book = sample();
        book.stock = -3;
        assert!(matches!(book.validate(), Err(InventoryError::InvalidInput(_))));

        let mut book = sample();
        book.price = -0.01;
        assert!(matches!(book.validate(), Err(InventoryError::InvalidInput(_))));

        let mut book = sample();
        book.price = f64::NAN;
        assert!(book.validate().is_err());

        let mut book = sample();
        book.title = "Pipes | Filters".into();
        assert!(book.validate().is_err());

        let mut book = sample();
        book.isbn.clear();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_normalized_rounds_price_to_cents() {
        let book = Book::new("A", "P", "1", "X", 1, 9.999).normalized();
        assert_eq!(book.price, 10.0);

        let book = Book::new("A", "P", "1", "X", 1, 3.334).normalized();
        assert_eq!(book.price, 3.33);
        assert_eq!(Book::from_line(&book.to_line()).unwrap(), book);
    }

    #[test]
    fn test_from_line_rounds_sub_cent_price() {
        let book = Book::from_line("A|P|1|X|1|2.504").unwrap();
        assert_eq!(book.price, 2.5);
    }

    #[test]
    fn test_validate_rejects_price_above_max() {
        let mut book = sample();
        book.price = MAX_AMOUNT * 10.0;
        assert!(matches!(book.validate(), Err(InventoryError::InvalidInput(_))));
    }

    #[test]
    fn test_value() {
        let book = Book::new("A", "P", "1", "X", 4, 2.5);
        assert!((book.value() - 10.0).abs() < f64::EPSILON);
    }
}
