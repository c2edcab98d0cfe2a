//! The lottery machine session
//!
//! Ties the catalog, the repeat-rate model, the draw engine and the
//! collection store together behind the event-driven spin lifecycle:
//!
//! * [`LotteryMachine::begin_spin`] flips `is_spinning` on, or does nothing
//!   if a spin is already in flight.
//! * The host waits out the spin animation (a timer in the browser).
//! * [`LotteryMachine::finish_spin`] draws, applies the win, persists, and
//!   flips `is_spinning` off.
//!
//! Observers are called synchronously after every state change.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::draw::{draw_with_outcome, DrawSource};
use crate::error::ConfigError;
use crate::log;
use crate::repeat_rate::compute_repeat_rate;
use crate::rng::DrawRng;
use crate::state::{clamp_coins, parse_coins, MachineConfig, MachineState};
use crate::storage::{CollectionStore, Storage};
use crate::types::{Item, ItemId};
use crate::view::MachineView;

/// State changes reported to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MachineEvent {
    CoinsChanged { coins: u32 },
    SpinStarted,
    /// A win was applied to the collection
    CollectionUpdated { item_id: ItemId, amount: u32 },
    SpinCompleted { item: Item },
    Reset,
}

/// Outcome of a spin request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRequest {
    /// The spin was accepted; call `finish_spin` once the delay elapses
    Started,
    /// A spin is already in flight; the request was ignored
    AlreadySpinning,
}

/// Handle returned by [`LotteryMachine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&MachineEvent, &MachineView)>;

/// A lottery machine session over a storage backend and a random source
pub struct LotteryMachine<S, R> {
    config: MachineConfig,
    catalog: Catalog,
    state: MachineState,
    store: CollectionStore<S>,
    rng: R,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: Storage, R: DrawRng> LotteryMachine<S, R> {
    /// Start a session, restoring any persisted collection.
    ///
    /// Fails only on invalid configuration.
    pub fn new(config: MachineConfig, storage: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = Catalog::generate(config.total_items)?;
        let store = CollectionStore::new(storage, config.storage_key.clone());
        let collection = store.restore(&catalog);

        log::info(&format!(
            "=== LOTTERY MACHINE INITIALIZED ({} items, {} owned) ===",
            catalog.len(),
            collection.len()
        ));

        let machine = Self {
            config,
            catalog,
            state: MachineState::new(collection),
            store,
            rng,
            observers: Vec::new(),
            next_subscription: 0,
        };
        machine.log_state();
        Ok(machine)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    pub fn coins(&self) -> u32 {
        self.state.coins
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    pub fn last_win(&self) -> Option<&Item> {
        self.state.last_win.and_then(|id| self.catalog.get(id))
    }

    /// Current repeat rate, derived on demand
    pub fn repeat_rate(&self) -> f64 {
        compute_repeat_rate(
            self.state.collection.len(),
            self.state.coins,
            self.catalog.len(),
        )
    }

    pub fn view(&self) -> MachineView {
        MachineView::from_state(&self.state, &self.catalog)
    }

    /// Register an observer called after every state change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&MachineEvent, &MachineView) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Set the coin count, clamped to at least one.
    ///
    /// Ignored while a spin is in flight. Returns the coin count in effect.
    pub fn set_coins(&mut self, coins: i64) -> u32 {
        log::action("set_coins", &format!("coins={coins}"));
        if self.state.is_spinning {
            log::result(false, "coins are locked while spinning");
            return self.state.coins;
        }

        let coins = clamp_coins(coins);
        if coins != self.state.coins {
            self.state.coins = coins;
            self.notify(MachineEvent::CoinsChanged { coins });
            self.log_state();
        }
        self.state.coins
    }

    /// Set the coin count from raw user input
    pub fn set_coins_input(&mut self, input: &str) -> u32 {
        self.set_coins(i64::from(parse_coins(input)))
    }

    /// Request a spin
    pub fn begin_spin(&mut self) -> SpinRequest {
        log::action("begin_spin", "");
        if self.state.is_spinning {
            log::result(false, "spin already in progress");
            return SpinRequest::AlreadySpinning;
        }

        self.state.is_spinning = true;
        self.notify(MachineEvent::SpinStarted);
        SpinRequest::Started
    }

    /// Complete the in-flight spin: draw, record the win, persist.
    ///
    /// Returns `None` when no spin is in flight.
    pub fn finish_spin(&mut self) -> Option<Item> {
        if !self.state.is_spinning {
            log::debug("finish_spin", "no spin in flight");
            return None;
        }

        let repeat_rate = self.repeat_rate();
        let outcome = draw_with_outcome(
            &self.catalog,
            &self.state.collection,
            repeat_rate,
            &mut self.rng,
        );
        let item = outcome.item.clone();
        log::debug(
            "finish_spin",
            &format!(
                "roll={:.2} rate={:.2} source={:?} -> {} ({})",
                outcome.roll, repeat_rate, outcome.source, item.name, item.rarity
            ),
        );
        if outcome.source == DrawSource::FullCatalog {
            log::debug("finish_spin", "collection complete, drawing from full catalog");
        }

        let entry = self.state.collection.apply_win(&item);
        self.persist();
        self.notify(MachineEvent::CollectionUpdated {
            item_id: entry.item_id,
            amount: entry.amount,
        });

        self.state.last_win = Some(item.id);
        self.state.is_spinning = false;
        self.notify(MachineEvent::SpinCompleted { item: item.clone() });

        log::result(true, &format!("won {}", item.name));
        self.log_state();
        Some(item)
    }

    /// Begin and immediately finish a spin, skipping the animation delay
    pub fn spin_now(&mut self) -> Option<Item> {
        match self.begin_spin() {
            SpinRequest::Started => self.finish_spin(),
            SpinRequest::AlreadySpinning => None,
        }
    }

    /// Clear the collection, the last win and the persisted copy.
    ///
    /// Destructive; callers confirm with the user first. Refused while a
    /// spin is in flight, returning false.
    pub fn reset(&mut self) -> bool {
        log::action("reset", "clearing collection");
        if self.state.is_spinning {
            log::result(false, "cannot reset while spinning");
            return false;
        }

        self.state.reset();
        if let Err(e) = self.store.clear() {
            log::warn(&format!("reset: clearing storage failed: {e}"));
        }
        self.notify(MachineEvent::Reset);
        self.log_state();
        true
    }
}

// Private implementation methods
impl<S: Storage, R: DrawRng> LotteryMachine<S, R> {
    fn persist(&mut self) {
        if let Err(e) = self.store.persist(&self.state.collection, &self.catalog) {
            log::warn(&format!("persist failed, continuing unsaved: {e}"));
        }
    }

    fn notify(&mut self, event: MachineEvent) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for (_, observer) in self.observers.iter_mut() {
            observer(&event, &view);
        }
    }

    fn log_state(&self) {
        log::state_summary(
            self.state.coins,
            self.repeat_rate(),
            self.state.collection.len(),
            self.catalog.len(),
            self.state.is_spinning,
        );
    }
}

impl<S, R> core::fmt::Debug for LotteryMachine<S, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LotteryMachine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
