//! View types for UI serialization
//!
//! Owned snapshots of the machine handed to observers and to the frontend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::repeat_rate::compute_repeat_rate;
use crate::state::MachineState;
use crate::types::{CollectionEntry, Item, ItemId, Rarity};

/// View of a catalog item for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    pub rarity_styling: String,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            rarity: item.rarity,
            rarity_styling: item.styling().to_string(),
        }
    }
}

/// View of an owned item, with its repeat count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntryView {
    #[serde(flatten)]
    pub item: ItemView,
    pub amount: u32,
}

impl CollectionEntryView {
    fn from_entry(entry: &CollectionEntry, catalog: &Catalog) -> Option<Self> {
        catalog.get(entry.item_id).map(|item| Self {
            item: ItemView::from(item),
            amount: entry.amount,
        })
    }
}

/// The complete machine view sent to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineView {
    pub coins: u32,
    /// Percentage in [0, 100]
    pub repeat_rate: f64,
    pub total_items: u32,
    /// Distinct owned items
    pub collection_size: usize,
    pub is_spinning: bool,
    pub last_win: Option<ItemView>,
    /// Owned items in the order they were first won
    pub collection: Vec<CollectionEntryView>,
    /// Distinct owned items per rarity tier
    pub owned_by_rarity: BTreeMap<Rarity, u32>,
}

impl MachineView {
    pub fn from_state(state: &MachineState, catalog: &Catalog) -> Self {
        let collection: Vec<CollectionEntryView> = state
            .collection
            .entries()
            .iter()
            .filter_map(|entry| CollectionEntryView::from_entry(entry, catalog))
            .collect();

        let mut owned_by_rarity = BTreeMap::new();
        for entry in &collection {
            *owned_by_rarity.entry(entry.item.rarity).or_insert(0) += 1;
        }

        Self {
            coins: state.coins,
            repeat_rate: compute_repeat_rate(state.collection.len(), state.coins, catalog.len()),
            total_items: catalog.len(),
            collection_size: state.collection.len(),
            is_spinning: state.is_spinning,
            last_win: state
                .last_win
                .and_then(|id| catalog.get(id))
                .map(ItemView::from),
            collection,
            owned_by_rarity,
        }
    }
}
