use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::error::ConfigError;
use crate::types::ItemId;

/// Default catalog size
pub const DEFAULT_TOTAL_ITEMS: u32 = 100;
/// Default duration of the spinning animation, in milliseconds
pub const DEFAULT_SPIN_DELAY_MS: u32 = 1500;
/// Default storage key for the persisted collection
pub const DEFAULT_STORAGE_KEY: &str = "lotteryCollection";
/// Smallest accepted coin count
pub const MIN_COINS: u32 = 1;

/// Deploy-time machine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MachineConfig {
    /// Catalog size; also sets the rarity bands and repeat-rate increment
    pub total_items: u32,
    /// Delay between a spin request and its draw
    pub spin_delay_ms: u32,
    /// Key the collection is persisted under
    pub storage_key: String,
}

impl MachineConfig {
    pub fn with_total_items(total_items: u32) -> Self {
        Self {
            total_items,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_items == 0 {
            return Err(ConfigError::EmptyCatalog(self.total_items));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            total_items: DEFAULT_TOTAL_ITEMS,
            spin_delay_ms: DEFAULT_SPIN_DELAY_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Mutable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// Coins inserted; never below [`MIN_COINS`]
    pub coins: u32,
    /// Owned items
    pub collection: Collection,
    /// Item won by the most recent spin
    pub last_win: Option<ItemId>,
    /// True only between spin start and spin completion
    pub is_spinning: bool,
}

impl MachineState {
    pub fn new(collection: Collection) -> Self {
        Self {
            coins: MIN_COINS,
            collection,
            last_win: None,
            is_spinning: false,
        }
    }

    /// Clear everything a reset discards. Coins are a control setting and
    /// survive.
    pub fn reset(&mut self) {
        self.collection.clear();
        self.last_win = None;
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new(Collection::new())
    }
}

/// Clamp a numeric coin value to the accepted range
pub fn clamp_coins(value: i64) -> u32 {
    if value < i64::from(MIN_COINS) {
        MIN_COINS
    } else {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

/// Parse user coin input.
///
/// Leading whitespace and a sign are accepted, then the leading run of
/// digits is used (`"12abc"` is 12). Anything without digits, zero, or a
/// negative value becomes [`MIN_COINS`]; overflow saturates.
pub fn parse_coins(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() || negative {
        return MIN_COINS;
    }

    match digits.parse::<u64>() {
        Ok(value) => clamp_coins(i64::try_from(value).unwrap_or(i64::MAX)),
        // Only overflow can fail here
        Err(_) => u32::MAX,
    }
}
