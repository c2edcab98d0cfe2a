pub mod engine;
pub mod storage;

use wasm_bindgen::prelude::*;

pub use engine::LotteryEngine;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(feature = "browser_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Repeat rate for a hypothetical collection, for "what if" displays
#[wasm_bindgen]
pub fn preview_repeat_rate(collection_size: u32, coins: u32, total_items: u32) -> f64 {
    lottery_core::compute_repeat_rate(collection_size as usize, coins, total_items)
}
