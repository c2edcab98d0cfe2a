//! Draw engine
//!
//! One draw is a weighted coin flip followed by a uniform pick:
//!
//! 1. Roll `r` in `[0, 100)`.
//! 2. If `r < repeat_rate` and something is owned, pick uniformly among the
//!    distinct owned items. `amount` plays no part in the pick.
//! 3. Otherwise pick uniformly among items not yet owned, or among the whole
//!    catalog once everything is owned.

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::rng::DrawRng;
use crate::types::Item;

/// Which pool produced the winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    /// Picked among already owned items
    Repeat,
    /// Picked among items not yet owned
    Fresh,
    /// Everything was owned, picked among the full catalog
    FullCatalog,
}

/// Result of a single draw
#[derive(Debug, Clone, Copy)]
pub struct DrawOutcome<'a> {
    pub item: &'a Item,
    pub source: DrawSource,
    /// The percentage roll compared against the repeat rate
    pub roll: f64,
}

/// Perform one draw and return the winning catalog item
pub fn draw<'a, R: DrawRng>(
    catalog: &'a Catalog,
    collection: &Collection,
    repeat_rate: f64,
    rng: &mut R,
) -> &'a Item {
    draw_with_outcome(catalog, collection, repeat_rate, rng).item
}

/// Like [`draw`], also reporting the roll and which pool was used
pub fn draw_with_outcome<'a, R: DrawRng>(
    catalog: &'a Catalog,
    collection: &Collection,
    repeat_rate: f64,
    rng: &mut R,
) -> DrawOutcome<'a> {
    let roll = rng.roll_percent();

    if roll < repeat_rate && !collection.is_empty() {
        let owned: Vec<&Item> = collection
            .owned_ids()
            .filter_map(|id| catalog.get(id))
            .collect();
        if !owned.is_empty() {
            let item = owned[rng.gen_range(owned.len())];
            return DrawOutcome {
                item,
                source: DrawSource::Repeat,
                roll,
            };
        }
    }

    let owned = collection.owned_set();
    let fresh: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|item| !owned.contains(&item.id))
        .collect();

    if fresh.is_empty() {
        let items = catalog.items();
        DrawOutcome {
            item: &items[rng.gen_range(items.len())],
            source: DrawSource::FullCatalog,
            roll,
        }
    } else {
        DrawOutcome {
            item: fresh[rng.gen_range(fresh.len())],
            source: DrawSource::Fresh,
            roll,
        }
    }
}
