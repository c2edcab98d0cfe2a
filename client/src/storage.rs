//! Browser `localStorage` backend

use lottery_core::error::{StorageError, StorageResult};
use lottery_core::log;
use lottery_core::storage::Storage;
use wasm_bindgen::JsValue;

/// The window's `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Acquire `window.localStorage`.
    ///
    /// Returns `None` outside a window context or when the browser denies
    /// access (private mode, disabled cookies).
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(inner)) => Some(Self { inner }),
            Ok(None) => {
                log::warn("localStorage is not available");
                None
            }
            Err(e) => {
                log::warn(&format!("localStorage access denied: {:?}", e));
                None
            }
        }
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", e))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.inner.remove_item(key).map_err(js_error)
    }
}
