use super::*;

#[test]
fn memory_store_round_trips_values() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", serde_json::json!(["1", "2"])).unwrap();
    assert_eq!(store.get("k").unwrap(), Some(serde_json::json!(["1", "2"])));
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set("vahan-wishlist", serde_json::json!(["3"])).unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("vahan-wishlist").unwrap(),
        Some(serde_json::json!(["3"]))
    );
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn corrupt_file_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(err.to_string().starts_with("persistence error:"));
}
