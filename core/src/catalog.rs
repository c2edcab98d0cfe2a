//! Catalog generation
//!
//! The catalog is derived entirely from its size, so it is never persisted.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::types::{Item, ItemId, Rarity};

/// The immutable set of collectible items, ordered by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build the catalog for `total_items` items with ids `1..=total_items`
    pub fn generate(total_items: u32) -> Result<Self, ConfigError> {
        if total_items == 0 {
            return Err(ConfigError::EmptyCatalog(total_items));
        }

        let items = (1..=total_items)
            .map(|position| {
                Item::new(
                    ItemId(position),
                    format!("Item {position}"),
                    Rarity::for_position(position, total_items),
                )
            })
            .collect();

        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items; always at least one
    pub fn len(&self) -> u32 {
        self.items.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        // ids are dense and 1-based
        let index = (id.0 as usize).checked_sub(1)?;
        self.items.get(index)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// How many catalog items fall in each tier
    pub fn rarity_counts(&self) -> BTreeMap<Rarity, u32> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.rarity).or_insert(0) += 1;
        }
        counts
    }
}
