//! Lottery machine core
//!
//! A player spins to win one item from a fixed catalog. The more of the
//! catalog they own, the more likely a spin repeats an owned item; extra
//! coins push that chance back down.

pub mod catalog;
pub mod collection;
pub mod draw;
pub mod error;
pub mod log;
pub mod machine;
pub mod repeat_rate;
pub mod rng;
pub mod state;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use collection::Collection;
pub use draw::{draw, draw_with_outcome, DrawOutcome, DrawSource};
pub use error::{ConfigError, StorageError, StorageResult};
pub use machine::{LotteryMachine, MachineEvent, SpinRequest, SubscriptionId};
pub use repeat_rate::{compute_repeat_rate, repeat_increase};
pub use rng::{DrawRng, XorShiftRng};
pub use state::*;
pub use storage::{CollectionStore, MemoryStorage, Storage};
pub use types::*;
pub use view::*;
