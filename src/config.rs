//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the drive.

// =============================================================================
// Persistence
// =============================================================================

/// Storage key holding the JSON array of files.
pub const FILES_KEY: &str = "drive_files";

/// Storage key holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "drive_folders";

/// IndexedDB settings for the IndexedDB storage adapter.
pub mod indexed_db {
    /// Database name.
    pub const DATABASE: &str = "webdrive";
    /// Schema version. Bump when the object store layout changes.
    pub const VERSION: u32 = 1;
    /// Object store holding the serialized blobs.
    pub const STORE: &str = "kv";
}

// =============================================================================
// Entity Defaults
// =============================================================================

/// Display label and serialized sentinel for the root location.
pub const ROOT_LABEL: &str = "My Drive";

/// Owner label assigned to uploaded files.
pub const DEFAULT_OWNER: &str = "me";

/// Length in bytes of a generated entity id (128 bits).
pub const ID_BYTES: usize = 16;

// =============================================================================
// Views
// =============================================================================

/// Maximum number of files shown in the `recent` view.
pub const RECENT_LIMIT: usize = 20;

/// Number of folders shown in the "Suggested folders" strip of `myDrive`.
pub const SUGGESTED_FOLDER_COUNT: usize = 3;

// =============================================================================
// Storage Accounting
// =============================================================================

/// Bytes per binary kilobyte, used by size formatting.
pub const BYTES_PER_KB: u64 = 1024;

/// Storage quota shown next to the usage meter (15 GB).
pub const STORAGE_QUOTA_BYTES: u64 = 15 * BYTES_PER_KB * BYTES_PER_KB * BYTES_PER_KB;
