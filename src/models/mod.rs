//! Data models and types for the drive.
//!
//! Contains domain types for:
//! - [`File`], [`Folder`], [`EntityId`], [`Location`] - Persisted drive entities
//! - [`FileUpload`] - Upload input descriptors
//! - [`ViewMode`], [`LayoutMode`], [`ScopeMode`] - View selection
//! - [`Session`] - Per-session UI state
//! - [`Notification`] - Messages for the presentation layer

mod entity;
mod notification;
mod session;
mod view;

pub use entity::{Entity, EntityId, EntityKind, File, FileUpload, Folder, Location};
pub use notification::Notification;
pub use session::Session;
pub use view::{LayoutMode, ScopeMode, UnknownViewMode, ViewMode};
