//! Repeat-rate model
//!
//! The repeat rate is the chance (in percent) that the next draw picks an
//! item the player already owns. It is always recomputed from its inputs and
//! never stored.

/// Upper bound of the repeat rate
pub const MAX_REPEAT_RATE: f64 = 100.0;

/// Percentage points added per owned item (and removed per extra coin)
pub fn repeat_increase(total_items: u32) -> f64 {
    (100.0 / f64::from(total_items.max(1))) * 2.0
}

/// Compute the repeat rate for a collection of `collection_size` distinct
/// items when `coins` coins are inserted.
///
/// Every coin past the first cancels one owned item's worth of increase.
/// The result is clamped to `[0, 100]`; the draw compares against a roll in
/// `[0, 100)` so the upper clamp does not change any outcome.
pub fn compute_repeat_rate(collection_size: usize, coins: u32, total_items: u32) -> f64 {
    let increase = repeat_increase(total_items);
    let base = collection_size as f64 * increase;
    let discount = f64::from(coins.max(1) - 1) * increase;
    (base - discount).clamp(0.0, MAX_REPEAT_RATE)
}
