//! The player's collection of won items
//!
//! Entries keep the order in which items were first won. `apply_win` is the
//! only way an entry is added or incremented.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::types::{CollectionEntry, Item, ItemId};

/// Owned items keyed by item id, one entry per distinct item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<CollectionEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a win of `item`, returning the entry after the update
    pub fn apply_win(&mut self, item: &Item) -> CollectionEntry {
        match self.entries.iter_mut().find(|e| e.item_id == item.id) {
            Some(entry) => {
                entry.amount = entry.amount.saturating_add(1);
                *entry
            }
            None => {
                let entry = CollectionEntry::first(item.id);
                self.entries.push(entry);
                entry
            }
        }
    }

    /// Merge a restored entry, keeping ids unique
    pub(crate) fn merge_entry(&mut self, item_id: ItemId, amount: u32) {
        let amount = amount.max(1);
        match self.entries.iter_mut().find(|e| e.item_id == item_id) {
            Some(entry) => entry.amount = entry.amount.saturating_add(amount),
            None => self.entries.push(CollectionEntry { item_id, amount }),
        }
    }

    pub fn get(&self, item_id: ItemId) -> Option<&CollectionEntry> {
        self.entries.iter().find(|e| e.item_id == item_id)
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.get(item_id).is_some()
    }

    /// Number of distinct owned items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Ids of owned items, in the order they were first won
    pub fn owned_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.iter().map(|e| e.item_id)
    }

    pub fn owned_set(&self) -> BTreeSet<ItemId> {
        self.owned_ids().collect()
    }

    /// Total number of wins, repeats included
    pub fn total_pulls(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }

    /// Whether every catalog item is owned
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        catalog.items().iter().all(|item| self.contains(item.id))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
