//! Integration and property tests for BookStore
//!
//! These tests verify:
//! - ISBN uniqueness on add and update
//! - Lookup returns exactly the stored fields
//! - Stock adjustment never drives stock negative
//! - Sorted views are stable, descending permutations of the store

use bookstore::{Book, BookStore, InventoryError};
use proptest::prelude::*;

fn arb_book(isbn: String) -> impl Strategy<Value = Book> {
    (
        "[A-Za-z ]{1,20}",
        "[A-Za-z]{1,12}",
        "[A-Za-z]{1,12}",
        0..1_000i32,
        0..100_000u32,
    )
        .prop_map(move |(title, publisher, author, stock, cents)| {
            Book::new(title, publisher, isbn.clone(), author, stock, f64::from(cents) / 100.0)
        })
}

/// Books with distinct ISBNs `0..n`, prices and stock drawn from a small range
/// so that ties are common.
fn arb_store_books() -> impl Strategy<Value = Vec<Book>> {
    proptest::collection::vec((0..5i32, 0..5u32), 0..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (stock, price))| {
                Book::new(format!("T{i}"), "P", i.to_string(), "A", stock, f64::from(price))
            })
            .collect()
    })
}

#[test]
fn test_duplicate_add_leaves_store_unchanged() {
    let mut store = BookStore::new();
    store.add(Book::new("First", "P", "X", "A", 1, 1.0)).unwrap();

    let err = store.add(Book::new("Second", "P", "X", "A", 9, 9.0)).unwrap_err();

    assert!(matches!(err, InventoryError::DuplicateKey(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(store.find_by_isbn("X").unwrap().title, "First");
}

#[test]
fn test_crud_lifecycle() {
    let mut store = BookStore::new();
    store
        .add(Book::new("Dune", "Chilton", "978-0441013593", "Herbert", 3, 9.99))
        .unwrap();
    store
        .add(Book::new("Hyperion", "Doubleday", "978-0553283686", "Simmons", 2, 8.5))
        .unwrap();

    store
        .update(
            "978-0441013593",
            Book::new("Dune (Deluxe)", "Ace", "978-0441013593", "Frank Herbert", 7, 20.0),
        )
        .unwrap();
    let dune = store.find_by_isbn("978-0441013593").unwrap();
    assert_eq!(dune.title, "Dune (Deluxe)");
    assert_eq!(dune.publisher, "Ace");
    assert_eq!(dune.stock, 7);

    store.delete("978-0553283686").unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.find_by_title("Hyperion").is_empty());
}

#[test]
fn test_update_rejects_invalid_record() {
    let mut store = BookStore::new();
    store.add(Book::new("A", "P", "1", "X", 1, 1.0)).unwrap();

    let err = store
        .update("1", Book::new("A", "P", "1", "X", 1, -5.0))
        .unwrap_err();

    assert!(matches!(err, InventoryError::InvalidInput(_)));
    assert_eq!(store.find_by_isbn("1").unwrap().price, 1.0);
}

proptest! {
    #[test]
    fn prop_added_book_is_found_verbatim(book in arb_book("978-0000000001".to_string())) {
        let mut store = BookStore::new();
        store.add(book.clone()).unwrap();
        prop_assert_eq!(store.find_by_isbn(&book.isbn), Some(&book));
    }

    #[test]
    fn prop_second_add_with_same_isbn_is_rejected(
        first in arb_book("dup".to_string()),
        second in arb_book("dup".to_string()),
    ) {
        let mut store = BookStore::new();
        store.add(first.clone()).unwrap();
        prop_assert!(store.add(second).is_err());
        prop_assert_eq!(store.all(), std::slice::from_ref(&first));
    }

    #[test]
    fn prop_adjust_stock_never_goes_negative(stock in 0..1_000i32, delta in -2_000i64..2_000) {
        let mut store = BookStore::new();
        store.add(Book::new("A", "P", "1", "X", stock, 1.0)).unwrap();

        let result = store.adjust_stock("1", delta);
        if i64::from(stock) + delta < 0 {
            let is_insufficient = matches!(result, Err(InventoryError::InsufficientStock { .. }));
            prop_assert!(is_insufficient);
            prop_assert_eq!(store.stock_of("1"), Some(stock));
        } else {
            let expected = i32::try_from(i64::from(stock) + delta).unwrap();
            prop_assert_eq!(result.unwrap(), expected);
            prop_assert_eq!(store.stock_of("1"), Some(expected));
        }
    }

    #[test]
    fn prop_sorted_by_price_is_stable_descending_permutation(books in arb_store_books()) {
        let mut store = BookStore::new();
        for book in &books {
            store.add(book.clone()).unwrap();
        }

        let view = store.sorted_by_price();
        prop_assert_eq!(view.len(), books.len());

        let mut isbns: Vec<usize> = view.iter().map(|b| b.isbn.parse().unwrap()).collect();
        for pair in view.windows(2).zip(isbns.windows(2)) {
            let (books, idx) = pair;
            prop_assert!(books[0].price >= books[1].price);
            if books[0].price == books[1].price {
                prop_assert!(idx[0] < idx[1]);
            }
        }
        isbns.sort_unstable();
        prop_assert_eq!(isbns, (0..books.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_sorted_by_stock_is_stable_descending(books in arb_store_books()) {
        let mut store = BookStore::new();
        for book in &books {
            store.add(book.clone()).unwrap();
        }

        let view = store.sorted_by_stock();
        for pair in view.windows(2) {
            prop_assert!(pair[0].stock >= pair[1].stock);
            if pair[0].stock == pair[1].stock {
                let a: usize = pair[0].isbn.parse().unwrap();
                let b: usize = pair[1].isbn.parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
