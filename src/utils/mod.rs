//! Utility modules for display formatting and browser access.
//!
//! Provides:
//! - [`format_file_size`], [`format_date`] - Display formatting
//! - [`console`] - Devtools logging (no-op off wasm32)
//! - [`dom`] - Window and Web Storage access (wasm32 only)

pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod format;

pub use format::{format_date, format_file_size};
