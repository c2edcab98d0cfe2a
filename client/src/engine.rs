//! Lottery engine for browser WASM builds
//!
//! This module provides the machine exposed to JavaScript via wasm-bindgen.
//! All methods take `&self` so a JS listener may call back into the engine
//! while it is being notified.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lottery_core::log;
use lottery_core::machine::{LotteryMachine, MachineEvent, SpinRequest};
use lottery_core::rng::XorShiftRng;
use lottery_core::state::MachineConfig;
use lottery_core::storage::{MemoryStorage, Storage};
use lottery_core::view::{ItemView, MachineView};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::storage::LocalStorage;

type Machine = LotteryMachine<Box<dyn Storage>, XorShiftRng>;

/// A state change waiting to be delivered to JS listeners
struct Notification {
    event: MachineEvent,
    view: MachineView,
}

/// State shared between the engine handle and pending timer callbacks
struct Shared {
    machine: RefCell<Machine>,
    outbox: Rc<RefCell<Vec<Notification>>>,
    listeners: RefCell<Vec<(u32, js_sys::Function)>>,
}

/// The lottery machine exposed to WASM
#[wasm_bindgen]
pub struct LotteryEngine {
    shared: Rc<Shared>,
    next_listener: Cell<u32>,
}

#[wasm_bindgen]
impl LotteryEngine {
    /// Create an engine from an optional config object
    /// (`{ totalItems, spinDelayMs, storageKey }`, all optional).
    ///
    /// Throws on invalid configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LotteryEngine, String> {
        let config: MachineConfig = if config.is_undefined() || config.is_null() {
            MachineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| format!("Failed to parse config: {:?}", e))?
        };

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn("collection will not be persisted this session");
                Box::new(MemoryStorage::new())
            }
        };

        let mut machine = LotteryMachine::new(config, storage, XorShiftRng::from_entropy())
            .map_err(|e| format!("Invalid configuration: {}", e))?;

        let outbox: Rc<RefCell<Vec<Notification>>> = Rc::default();
        let sink = Rc::clone(&outbox);
        machine.subscribe(move |event, view| {
            sink.borrow_mut().push(Notification {
                event: event.clone(),
                view: view.clone(),
            });
        });

        Ok(Self {
            shared: Rc::new(Shared {
                machine: RefCell::new(machine),
                outbox,
                listeners: RefCell::new(Vec::new()),
            }),
            next_listener: Cell::new(0),
        })
    }

    /// Get the current machine view as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        log::debug("get_view", "Serializing machine state to view");
        let view = self.shared.machine.borrow().view();
        to_js(&view)
    }

    /// Get the full catalog as JSON
    #[wasm_bindgen]
    pub fn get_catalog(&self) -> JsValue {
        let machine = self.shared.machine.borrow();
        let items: Vec<ItemView> = machine.catalog().items().iter().map(ItemView::from).collect();
        to_js(&items)
    }

    #[wasm_bindgen]
    pub fn repeat_rate(&self) -> f64 {
        self.shared.machine.borrow().repeat_rate()
    }

    #[wasm_bindgen]
    pub fn is_spinning(&self) -> bool {
        self.shared.machine.borrow().is_spinning()
    }

    #[wasm_bindgen]
    pub fn coins(&self) -> u32 {
        self.shared.machine.borrow().coins()
    }

    /// Set the coin count from a number; non-finite values count as 1
    #[wasm_bindgen]
    pub fn set_coins(&self, coins: f64) -> u32 {
        let coins = if coins.is_finite() { coins as i64 } else { 1 };
        let applied = self.shared.machine.borrow_mut().set_coins(coins);
        flush(&self.shared);
        applied
    }

    /// Set the coin count from the raw text of an input field
    #[wasm_bindgen]
    pub fn set_coins_input(&self, input: &str) -> u32 {
        let applied = self.shared.machine.borrow_mut().set_coins_input(input);
        flush(&self.shared);
        applied
    }

    /// Start a spin. The draw happens after the configured delay.
    ///
    /// Returns false, without any effect, while a spin is in flight.
    #[wasm_bindgen]
    pub fn spin(&self) -> bool {
        let (request, delay_ms) = {
            let mut machine = self.shared.machine.borrow_mut();
            let request = machine.begin_spin();
            (request, machine.config().spin_delay_ms)
        };
        flush(&self.shared);

        match request {
            SpinRequest::Started => {
                schedule_finish(&self.shared, delay_ms);
                true
            }
            SpinRequest::AlreadySpinning => false,
        }
    }

    /// Clear the collection and its saved copy. The caller is responsible
    /// for confirming with the user first.
    ///
    /// Returns false while a spin is in flight.
    #[wasm_bindgen]
    pub fn reset(&self) -> bool {
        let done = self.shared.machine.borrow_mut().reset();
        flush(&self.shared);
        done
    }

    /// Register `callback(event, view)`; returns an id for `unsubscribe`
    #[wasm_bindgen]
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        let id = self.next_listener.get() + 1;
        self.next_listener.set(id);
        self.shared.listeners.borrow_mut().push((id, callback));
        id
    }

    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u32) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}

// Private implementation helpers

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match value.serialize(&serializer) {
        Ok(val) => val,
        Err(e) => {
            log::error(&format!("serialization failed: {:?}", e));
            JsValue::NULL
        }
    }
}

/// Run the draw once the spin animation has had time to play
fn schedule_finish(shared: &Rc<Shared>, delay_ms: u32) {
    let task_shared = Rc::clone(shared);
    let task = Closure::once_into_js(move || complete_spin(&task_shared));
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);

    let scheduled = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                task.unchecked_ref(),
                timeout,
            )
        });

    if let Err(e) = scheduled {
        // A spin always completes, so finish it now rather than strand it
        log::warn(&format!("setTimeout failed ({:?}), finishing spin now", e));
        complete_spin(shared);
    }
}

fn complete_spin(shared: &Rc<Shared>) {
    let won = shared.machine.borrow_mut().finish_spin();
    if let Some(item) = won {
        log::debug("complete_spin", &format!("won {}", item.name));
    }
    flush(shared);
}

/// Deliver queued notifications to JS listeners.
///
/// Must be called with no outstanding borrow of the machine.
fn flush(shared: &Rc<Shared>) {
    let pending: Vec<Notification> = std::mem::take(&mut *shared.outbox.borrow_mut());
    if pending.is_empty() {
        return;
    }
    // Snapshot so listeners may subscribe or unsubscribe while being called
    let listeners: Vec<js_sys::Function> = shared
        .listeners
        .borrow()
        .iter()
        .map(|(_, f)| f.clone())
        .collect();

    for notification in pending {
        let event = to_js(&notification.event);
        let view = to_js(&notification.view);
        for listener in &listeners {
            if let Err(e) = listener.call2(&JsValue::NULL, &event, &view) {
                log::error(&format!("listener threw: {:?}", e));
            }
        }
    }
}
