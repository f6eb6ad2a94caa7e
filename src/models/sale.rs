use super::book::{FIELD_SEPARATOR, MAX_AMOUNT, RecordError, round_to_cents};
use chrono::Local;
use std::fmt;

/// Number of fields in a serialized [`SaleRecord`] line.
pub const SALE_FIELD_COUNT: usize = 5;

/// Timestamp layout of [`SaleRecord::sale_time`].
pub const SALE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed purchase.
///
/// The title and total are snapshots taken at sale time; later edits to the
/// book (or its deletion) do not touch existing records.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub isbn: String,
    pub book_title: String,
    pub quantity: u32,
    pub total_price: f64,
    pub sale_time: String,
}

impl SaleRecord {
    /// Record a sale happening now. `total_price = quantity × unit_price`,
    /// rounded to whole cents.
    pub fn new(
        isbn: impl Into<String>,
        book_title: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            book_title: book_title.into(),
            quantity,
            total_price: round_to_cents(f64::from(quantity) * unit_price),
            sale_time: current_time(),
        }
    }

    /// Encode as one `isbn|title|quantity|total|time` line.
    pub fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{:.2}|{}",
            self.isbn, self.book_title, self.quantity, self.total_price, self.sale_time
        )
    }

    /// Decode a line produced by [`SaleRecord::to_line`].
    ///
    /// # Errors
    /// Fails when the field count is not exactly five, quantity is not a
    /// positive integer, or the total is not a number in `0..=MAX_AMOUNT`.
    /// The total is rounded to whole cents.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [isbn, book_title, quantity, total_price, sale_time] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                expected: SALE_FIELD_COUNT,
                found: fields.len(),
            });
        };

        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| RecordError::InvalidNumber {
                field: "quantity",
                value: (*quantity).to_string(),
            })?;
        let total_price = total_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && (0.0..=MAX_AMOUNT).contains(t))
            .map(round_to_cents)
            .ok_or_else(|| RecordError::InvalidNumber {
                field: "total_price",
                value: (*total_price).to_string(),
            })?;
        if isbn.is_empty() {
            return Err(RecordError::Invalid("ISBN must not be empty".into()));
        }

        Ok(Self {
            isbn: (*isbn).to_string(),
            book_title: (*book_title).to_string(),
            quantity,
            total_price,
            sale_time: (*sale_time).to_string(),
        })
    }
}

impl fmt::Display for SaleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ISBN: {}, Title: {}, Quantity: {}, Total: {:.2}",
            self.sale_time, self.isbn, self.book_title, self.quantity, self.total_price
        )
    }
}

fn current_time() -> String {
    Local::now().format(SALE_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_new_computes_total() {
        let record = SaleRecord::new("111", "A", 3, 10.0);
        assert_eq!(record.quantity, 3);
        assert!((record.total_price - 30.0).abs() < 1e-9);
        assert!(NaiveDateTime::parse_from_str(&record.sale_time, SALE_TIME_FORMAT).is_ok());
    }

    #[test]
    fn test_line_round_trip() {
        let record = SaleRecord {
            isbn: "111".into(),
            book_title: "A".into(),
            quantity: 2,
            total_price: 19.98,
            sale_time: "2024-05-01 10:30:00".into(),
        };
        assert_eq!(record.to_line(), "111|A|2|19.98|2024-05-01 10:30:00");
        assert_eq!(SaleRecord::from_line(&record.to_line()).unwrap(), record);
    }

    #[test]
    fn test_total_is_rounded_to_cents() {
        let record = SaleRecord::new("111", "A", 3, 3.333);
        assert_eq!(record.total_price, 10.0);
        assert_eq!(SaleRecord::from_line(&record.to_line()).unwrap(), record);
    }

    #[test]
    fn test_from_line_rejects_bad_records() {
        assert!(matches!(
            SaleRecord::from_line("111|A|2|19.98"),
            Err(RecordError::FieldCount { expected: 5, found: 4 })
        ));
        assert!(matches!(
            SaleRecord::from_line("111|A|0|0.00|2024-05-01 10:30:00"),
            Err(RecordError::InvalidNumber { field: "quantity", .. })
        ));
        assert!(matches!(
            SaleRecord::from_line("111|A|2|lots|2024-05-01 10:30:00"),
            Err(RecordError::InvalidNumber { field: "total_price", .. })
        ));
    }
}
