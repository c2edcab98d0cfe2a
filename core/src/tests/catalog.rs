use super::*;
use crate::types::Rarity;

#[test]
fn test_catalog_has_unique_sequential_ids() {
    for total in [1, 2, 3, 7, 20, 99, 100, 114, 1000] {
        let catalog = catalog(total);
        assert_eq!(catalog.len(), total);
        for (index, item) in catalog.items().iter().enumerate() {
            assert_eq!(item.id, ItemId(index as u32 + 1));
            assert_eq!(item.name, format!("Item {}", index + 1));
        }
    }
}

#[test]
fn test_rarity_bands_for_hundred_items() {
    let catalog = catalog(100);
    let counts = catalog.rarity_counts();

    assert_eq!(counts.get(&Rarity::Common), Some(&50));
    assert_eq!(counts.get(&Rarity::Uncommon), Some(&30));
    assert_eq!(counts.get(&Rarity::Rare), Some(&15));
    assert_eq!(counts.get(&Rarity::Legendary), Some(&5));
}

#[test]
fn test_boundary_items_take_the_lower_tier() {
    let catalog = catalog(100);
    let rarity = |id| catalog.get(ItemId(id)).map(|i| i.rarity);

    assert_eq!(rarity(50), Some(Rarity::Common));
    assert_eq!(rarity(51), Some(Rarity::Uncommon));
    assert_eq!(rarity(80), Some(Rarity::Uncommon));
    assert_eq!(rarity(81), Some(Rarity::Rare));
    assert_eq!(rarity(95), Some(Rarity::Rare));
    assert_eq!(rarity(96), Some(Rarity::Legendary));
    assert_eq!(rarity(100), Some(Rarity::Legendary));
}

#[test]
fn test_rarity_bands_for_uneven_size() {
    // 114 items: 50% = 57, 80% = 91.2, 95% = 108.3
    let catalog = catalog(114);
    let counts = catalog.rarity_counts();

    assert_eq!(counts.get(&Rarity::Common), Some(&57));
    assert_eq!(counts.get(&Rarity::Uncommon), Some(&34));
    assert_eq!(counts.get(&Rarity::Rare), Some(&17));
    assert_eq!(counts.get(&Rarity::Legendary), Some(&6));
}

#[test]
fn test_rarity_is_monotonic_in_id() {
    let catalog = catalog(37);
    let tiers: Vec<Rarity> = catalog.items().iter().map(|i| i.rarity).collect();
    let mut sorted = tiers.clone();
    sorted.sort();
    assert_eq!(tiers, sorted);
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(catalog(64), catalog(64));
}
