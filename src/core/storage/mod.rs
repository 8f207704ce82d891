//! Key-value persistence boundary.
//!
//! The drive stores its state as two JSON blobs through a [`StorageAdapter`].
//! Adapters:
//! - [`MemoryStorage`] - in-process map (tests, native hosts)
//! - [`WebStorage`] - `window.localStorage` (wasm32 only)
//! - [`IndexedDbStorage`] - IndexedDB object store (wasm32 only)

mod memory;

#[cfg(target_arch = "wasm32")]
mod indexed_db;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::MemoryStorage;

#[cfg(target_arch = "wasm32")]
pub use indexed_db::IndexedDbStorage;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

use super::error::StorageError;

/// Asynchronous string key-value store.
///
/// Futures are not required to be `Send`: browser storage lives on the
/// single UI thread.
#[allow(async_fn_in_trait)]
pub trait StorageAdapter {
    /// Read the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: StorageAdapter> StorageAdapter for &T {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
