//! Durable persistence of the collection
//!
//! The collection is written as a JSON array of denormalized records under a
//! single key after every mutation, and read back once at startup. Display
//! fields are re-derived from the catalog on restore so a stale name or
//! styling tag in storage never leaks into the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::error::{StorageError, StorageResult};
use crate::log;
use crate::types::{ItemId, Rarity};

/// A string key-value backend, shaped after the web `Storage` API
pub trait Storage {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// In-process storage, used by tests, the simulator, and as the fallback
/// when no durable backend is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// One persisted collection entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rarity: Option<Rarity>,
    #[serde(default, alias = "styling")]
    pub rarity_styling: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
}

fn default_amount() -> u32 {
    1
}

/// Encode a collection in the persisted format
pub fn encode_collection(collection: &Collection, catalog: &Catalog) -> StorageResult<String> {
    let records: Vec<StoredEntry> = collection
        .entries()
        .iter()
        .map(|entry| {
            let item = catalog.get(entry.item_id);
            StoredEntry {
                id: entry.item_id,
                name: item.map(|i| i.name.clone()).unwrap_or_default(),
                rarity: item.map(|i| i.rarity),
                rarity_styling: item.map(|i| i.styling().to_string()).unwrap_or_default(),
                amount: entry.amount,
            }
        })
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode the persisted format against the current catalog.
///
/// Entries for ids outside the catalog are dropped, duplicate ids are
/// merged, and an amount of zero counts as one.
pub fn decode_collection(raw: &str, catalog: &Catalog) -> StorageResult<Collection> {
    let records: Vec<StoredEntry> = serde_json::from_str(raw)?;
    let mut collection = Collection::new();
    for record in records {
        if !catalog.contains(record.id) {
            log::warn(&format!(
                "dropping stored item {} not present in a catalog of {}",
                record.id,
                catalog.len()
            ));
            continue;
        }
        collection.merge_entry(record.id, record.amount);
    }
    Ok(collection)
}

/// A collection bound to one key of a storage backend
#[derive(Debug)]
pub struct CollectionStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> CollectionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Overwrite the stored value with `collection`
    pub fn persist(&mut self, collection: &Collection, catalog: &Catalog) -> StorageResult<()> {
        let encoded = encode_collection(collection, catalog)?;
        self.storage.set(&self.key, &encoded)
    }

    /// Read the stored collection. Missing or unreadable data yields an
    /// empty collection; the failure is only logged.
    pub fn restore(&self, catalog: &Catalog) -> Collection {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::new(),
            Err(e) => {
                log::warn(&format!("restore: reading '{}' failed: {e}", self.key));
                return Collection::new();
            }
        };

        match decode_collection(&raw, catalog) {
            Ok(collection) => {
                log::debug(
                    "restore",
                    &format!("restored {} items from '{}'", collection.len(), self.key),
                );
                collection
            }
            Err(e) => {
                log::warn(&format!("restore: discarding stored collection: {e}"));
                Collection::new()
            }
        }
    }

    /// Remove the stored collection
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove(&self.key)
    }
}

/// Convenience for backends that can fail in a non-`StorageError` way
pub fn backend_error(e: impl core::fmt::Display) -> StorageError {
    StorageError::Backend(e.to_string())
}
