mod catalog;
mod log;
mod persistence;

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::machine::LotteryMachine;
use crate::rng::{DrawRng, XorShiftRng};
use crate::state::MachineConfig;
use crate::error::{StorageError, StorageResult};
use crate::storage::{MemoryStorage, Storage};
use crate::types::ItemId;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// RNG that replays a fixed list of raw values, cycling
struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Raw value whose percentage roll is roughly `percent`
    fn percent(percent: f64) -> u32 {
        ((percent / 100.0) * (f64::from(u32::MAX) + 1.0)) as u32
    }
}

impl DrawRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Backend whose every operation fails
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Backend("denied".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Backend("denied".to_string()))
    }
}

fn catalog(total: u32) -> Catalog {
    Catalog::generate(total).expect("positive catalog size")
}

/// Collection owning each listed id once
fn collection_of(catalog: &Catalog, ids: &[u32]) -> Collection {
    let mut collection = Collection::new();
    for &id in ids {
        let item = catalog.get(ItemId(id)).expect("id in catalog");
        collection.apply_win(item);
    }
    collection
}

fn machine(total: u32, seed: u64) -> LotteryMachine<MemoryStorage, XorShiftRng> {
    machine_with_storage(total, seed, MemoryStorage::new())
}

fn machine_with_storage(
    total: u32,
    seed: u64,
    storage: MemoryStorage,
) -> LotteryMachine<MemoryStorage, XorShiftRng> {
    LotteryMachine::new(
        MachineConfig::with_total_items(total),
        storage,
        XorShiftRng::seed_from_u64(seed),
    )
    .expect("valid config")
}
