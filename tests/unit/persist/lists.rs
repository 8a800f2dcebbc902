use super::*;
use crate::catalog::{BuiltinCatalog, CatalogSource};
use crate::persist::store::MemoryStore;

#[test]
fn wishlist_toggles_and_persists() {
    let mut list = Wishlist::open(MemoryStore::new());
    assert!(list.toggle("2").unwrap());
    assert!(list.toggle("5").unwrap());
    assert!(!list.toggle("2").unwrap());
    assert_eq!(list.ids(), ["5"]);

    let store = list.into_store();
    assert_eq!(
        store.get(WISHLIST_KEY).unwrap(),
        Some(serde_json::json!(["5"]))
    );
    let list = Wishlist::open(store);
    assert!(list.is_saved("5"));
}

#[test]
fn wishlist_merge_keeps_local_order() {
    let mut list = Wishlist::open(MemoryStore::new());
    list.toggle("3").unwrap();
    list.merge(["1".to_owned(), "3".to_owned()]).unwrap();
    assert_eq!(list.ids(), ["3", "1"]);
}

#[test]
fn corrupt_values_are_discarded() {
    let mut store = MemoryStore::new();
    store.set(WISHLIST_KEY, serde_json::json!({"oops": 1})).unwrap();
    store.set(COMPARE_KEY, serde_json::json!("nope")).unwrap();

    let list = Wishlist::open(store);
    assert!(list.ids().is_empty());
    let store = list.into_store();
    assert_eq!(store.get(WISHLIST_KEY).unwrap(), None);

    let compare = CompareList::open(store);
    assert!(compare.is_empty());
    assert_eq!(compare.into_store().get(COMPARE_KEY).unwrap(), None);
}

#[test]
fn compare_holds_at_most_four_distinct_bikes() {
    let bikes = BuiltinCatalog.fetch().unwrap();
    let mut compare = CompareList::open(MemoryStore::new());
    assert!(compare.add(&bikes[0]).unwrap());
    assert!(!compare.add(&bikes[0]).unwrap());
    for b in &bikes[1..6] {
        compare.add(b).unwrap();
    }
    assert_eq!(compare.len(), MAX_COMPARE);
    assert!(compare.is_full());
    assert!(!compare.contains(&bikes[4].id));

    compare.remove(&bikes[1].id).unwrap();
    assert!(!compare.contains(&bikes[1].id));
    assert_eq!(compare.len(), 3);

    let store = compare.into_store();
    let reopened = CompareList::open(store);
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.bikes()[0].id, bikes[0].id);

    let mut reopened = reopened;
    reopened.clear().unwrap();
    assert!(reopened.is_empty());
}
