use super::*;
use crate::storage::*;

const KEY: &str = "lotteryCollection";

#[test]
fn test_round_trip() {
    let catalog = catalog(100);
    let mut collection = collection_of(&catalog, &[5, 60, 99, 5]);
    collection.apply_win(catalog.get(ItemId(99)).unwrap());

    let mut store = CollectionStore::new(MemoryStorage::new(), KEY);
    store.persist(&collection, &catalog).unwrap();

    assert_eq!(store.restore(&catalog), collection);
}

#[test]
fn test_round_trip_empty_collection() {
    let catalog = catalog(10);
    let mut store = CollectionStore::new(MemoryStorage::new(), KEY);
    store.persist(&Collection::new(), &catalog).unwrap();

    assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[]"));
    assert!(store.restore(&catalog).is_empty());
}

#[test]
fn test_missing_key_restores_empty() {
    let catalog = catalog(10);
    let store = CollectionStore::new(MemoryStorage::new(), KEY);
    assert!(store.restore(&catalog).is_empty());
}

#[test]
fn test_garbage_restores_empty() {
    let catalog = catalog(10);
    let mut storage = MemoryStorage::new();
    storage.set(KEY, "{not json").unwrap();
    let store = CollectionStore::new(storage, KEY);

    assert!(store.restore(&catalog).is_empty());
}

#[test]
fn test_backend_failure_restores_empty() {
    let catalog = catalog(10);
    let mut store = CollectionStore::new(BrokenStorage, KEY);

    assert!(store.restore(&catalog).is_empty());
    assert!(store.persist(&Collection::new(), &catalog).is_err());
    assert!(store.clear().is_err());
}

#[test]
fn test_persisted_records_are_denormalized() {
    let catalog = catalog(100);
    let collection = collection_of(&catalog, &[96]);

    let encoded = encode_collection(&collection, &catalog).unwrap();
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{
            "id": 96,
            "name": "Item 96",
            "rarity": "Legendary",
            "rarityStyling": "text-amber-500 bg-amber-500/30 border-amber-500",
            "amount": 1
        }])
    );
}

#[test]
fn test_decode_accepts_legacy_styling_key() {
    let catalog = catalog(100);
    let raw = r#"[
        {"id": 1, "name": "Item 1", "rarity": "Common",
         "styling": "text-gray-500 bg-gray-500/30 border-gray-500 ", "amount": 3}
    ]"#;

    let collection = decode_collection(raw, &catalog).unwrap();
    assert_eq!(collection.get(ItemId(1)).map(|e| e.amount), Some(3));
}

#[test]
fn test_decode_ignores_stale_display_fields() {
    let catalog = catalog(100);
    let raw = r#"[{"id": 2, "name": "Renamed", "rarity": "Legendary", "amount": 1}]"#;

    let collection = decode_collection(raw, &catalog).unwrap();
    let restored = collection_of(&catalog, &[2]);
    assert_eq!(collection, restored);
}

#[test]
fn test_decode_drops_unknown_ids_and_merges_duplicates() {
    let catalog = catalog(10);
    let raw = r#"[
        {"id": 4, "amount": 2},
        {"id": 50, "amount": 1},
        {"id": 4, "amount": 3},
        {"id": 7, "amount": 0},
        {"id": 8}
    ]"#;

    let collection = decode_collection(raw, &catalog).unwrap();
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.get(ItemId(4)).map(|e| e.amount), Some(5));
    assert_eq!(collection.get(ItemId(7)).map(|e| e.amount), Some(1));
    assert_eq!(collection.get(ItemId(8)).map(|e| e.amount), Some(1));
    assert!(!collection.contains(ItemId(50)));
}

#[test]
fn test_clear_removes_key() {
    let catalog = catalog(10);
    let mut store = CollectionStore::new(MemoryStorage::new(), KEY);
    store.persist(&collection_of(&catalog, &[1]), &catalog).unwrap();

    store.clear().unwrap();

    assert_eq!(store.storage().get(KEY).unwrap(), None);
    assert!(store.restore(&catalog).is_empty());
}
