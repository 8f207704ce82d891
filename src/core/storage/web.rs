use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::StorageAdapter;
use crate::core::error::StorageError;
use crate::utils::dom;

/// Storage backend over `window.localStorage`.
///
/// Web Storage is synchronous; the async interface resolves immediately.
#[derive(Clone, Debug)]
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Bind to `window.localStorage`.
    pub fn local() -> Result<Self, StorageError> {
        dom::local_storage()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }

    /// Bind to `window.sessionStorage` (cleared when the tab closes).
    pub fn session() -> Result<Self, StorageError> {
        dom::session_storage()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }
}

impl StorageAdapter for WebStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::read(key, js_reason(&e)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Fails with QuotaExceededError once the origin's quota is used up
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::write(key, js_reason(&e)))
    }
}

/// Describe a thrown JS value.
pub(super) fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
