//! Core business logic for the drive.
//!
//! This module provides:
//! - [`Drive`] mutations and session state
//! - [`EntityStore`] collections and persistence
//! - [`select_view`] filtering for the current view
//! - [`StorageAdapter`] backends

mod drive;
pub mod error;
pub mod storage;
mod store;
mod view;

pub use drive::{Clock, DeleteOutcome, Drive};
pub use error::{DriveError, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::{IndexedDbStorage, WebStorage};
pub use storage::{MemoryStorage, StorageAdapter};
pub use store::{EntityStore, LoadOutcome, StorageUsage, total_size};
pub use view::{DriveView, FolderScope, ViewSelection, select_view};
