use shelf_core::{BookRecord, CatalogEntry, PriceQuote, ResultStore, Trend};

fn entry(isbn: &str, title: &str) -> CatalogEntry {
    CatalogEntry::new(
        BookRecord::from_source(isbn, title, None, None, None),
        PriceQuote {
            new_price: 15000,
            used_price: 8000,
            trend_new: Trend::Up,
            trend_used: Trend::Down,
            new_price_link: format!("https://books.example/new/{isbn}"),
            used_price_link: format!("https://books.example/used/{isbn}"),
        },
    )
}

fn titles(store: &ResultStore) -> Vec<String> {
    store
        .snapshot()
        .iter()
        .map(|e| e.book().title.clone())
        .collect()
}

#[test]
fn inserts_are_prepended() {
    let mut store = ResultStore::new();
    store.insert(entry("9780000000001", "A"));
    store.insert(entry("9780000000002", "B"));
    store.insert(entry("9780000000003", "C"));

    assert_eq!(titles(&store), vec!["C", "B", "A"]);
    assert_eq!(store.len(), 3);
}

#[test]
fn snapshot_can_be_iterated_repeatedly() {
    let mut store = ResultStore::new();
    store.insert(entry("9780000000001", "A"));
    store.insert(entry("9780000000002", "B"));

    let snapshot = store.snapshot();
    let first: Vec<_> = snapshot.iter().collect();
    let second: Vec<_> = snapshot.into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(snapshot.len(), 2);
}

#[test]
fn empty_store_has_empty_snapshot() {
    let store = ResultStore::new();
    assert!(store.is_empty());
    assert!(store.snapshot().is_empty());
    assert_eq!(store.snapshot().iter().count(), 0);
}
