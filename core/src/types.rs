use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for catalog items (1-based)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Rarity tier of a catalog item, derived from its position in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// All tiers, lowest first
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    /// Upper percentile bound (inclusive) of each tier except the last
    const BANDS: [(u64, Rarity); 3] = [
        (50, Rarity::Common),
        (80, Rarity::Uncommon),
        (95, Rarity::Rare),
    ];

    /// Classify the item at `position` (1-based) out of `total` items.
    ///
    /// The comparison is done in integers so an item sitting exactly on a
    /// cut point lands in the lower tier.
    pub fn for_position(position: u32, total: u32) -> Self {
        let scaled = u64::from(position) * 100;
        let total = u64::from(total);
        Self::BANDS
            .iter()
            .find(|(band, _)| scaled <= band * total)
            .map(|(_, rarity)| *rarity)
            .unwrap_or(Rarity::Legendary)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Opaque display tag handed to the presentation layer
    pub fn styling(&self) -> &'static str {
        match self {
            Rarity::Common => "text-gray-500 bg-gray-500/30 border-gray-500",
            Rarity::Uncommon => "text-blue-500 bg-blue-500/30 border-blue-500",
            Rarity::Rare => "text-purple-500 bg-purple-500/30 border-purple-500",
            Rarity::Legendary => "text-amber-500 bg-amber-500/30 border-amber-500",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A collectible item in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
        }
    }

    pub fn styling(&self) -> &'static str {
        self.rarity.styling()
    }
}

/// An owned item and how many times it has been won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub item_id: ItemId,
    pub amount: u32,
}

impl CollectionEntry {
    pub fn first(item_id: ItemId) -> Self {
        Self { item_id, amount: 1 }
    }
}
