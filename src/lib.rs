//! Browser-resident virtual drive.
//!
//! Holds a user's files and folders in memory, persists them as JSON
//! through a pluggable key-value [`StorageAdapter`], and derives the visible
//! subset for each view mode and search query.
//!
//! Module layout:
//! - [`core`] - mutations, entity store, view filtering, storage backends
//! - [`models`] - domain types
//! - [`config`] - storage keys and constants
//! - [`utils`] - display formatting and browser helpers

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    Clock, DeleteOutcome, Drive, DriveError, DriveView, EntityStore, FolderScope, LoadOutcome,
    MemoryStorage, StorageAdapter, StorageError, StorageUsage, ViewSelection, select_view,
    total_size,
};
#[cfg(target_arch = "wasm32")]
pub use crate::core::{IndexedDbStorage, WebStorage};
pub use models::{
    Entity, EntityId, EntityKind, File, FileUpload, Folder, LayoutMode, Location, Notification,
    ScopeMode, Session, ViewMode,
};
