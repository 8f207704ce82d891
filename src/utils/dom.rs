//! Browser handles behind [`WebStorage`](crate::core::storage::WebStorage).
//!
//! Each lookup yields `None` when the page has no window (workers) or the
//! origin blocks Web Storage; the adapter maps that to
//! [`StorageError::Unavailable`](crate::core::error::StorageError::Unavailable).

use web_sys::{Storage, Window};

#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Persistent per-origin store holding the drive blobs.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Per-tab store, cleared when the tab closes.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}
