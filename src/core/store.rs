//! Entity store: the authoritative file and folder collections.
//!
//! Collections are replaced wholesale, never edited in place. Storage usage is
//! recomputed from `files` every time the collection is assigned, loaded or
//! persisted, so it cannot drift from the data.

use std::fmt;

use serde::de::DeserializeOwned;

use super::error::DriveError;
use super::storage::StorageAdapter;
use crate::config::{FILES_KEY, FOLDERS_KEY, STORAGE_QUOTA_BYTES};
use crate::models::{EntityId, EntityKind, File, Folder};
use crate::utils::{console, format_file_size};

/// Result of [`EntityStore::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// At least one collection was read back from storage.
    Restored { files: usize, folders: usize },
    /// Nothing stored yet (first run).
    Empty,
    /// Storage or parse failure; in-memory state was left untouched.
    Failed(DriveError),
}

/// Sum of file sizes in bytes.
pub fn total_size(files: &[File]) -> u64 {
    files
        .iter()
        .fold(0u64, |acc, file| acc.saturating_add(file.size))
}

/// Owns the file and folder collections and their storage backend.
#[derive(Debug)]
pub struct EntityStore<S> {
    storage: S,
    files: Vec<File>,
    folders: Vec<Folder>,
    storage_used: u64,
}

impl<S: StorageAdapter> EntityStore<S> {
    /// Create an empty store over `storage`. Call [`load`](Self::load) to
    /// restore persisted state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            files: Vec::new(),
            folders: Vec::new(),
            storage_used: 0,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Total bytes used by all files.
    pub fn storage_used(&self) -> u64 {
        self.storage_used
    }

    /// Usage against the drive quota.
    pub fn usage(&self) -> StorageUsage {
        StorageUsage::new(self.storage_used)
    }

    pub fn file(&self, id: &EntityId) -> Option<&File> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn folder(&self, id: &EntityId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Check if an entity with `id` exists in the collection for `kind`.
    pub fn contains(&self, id: &EntityId, kind: EntityKind) -> bool {
        match kind {
            EntityKind::File => self.file(id).is_some(),
            EntityKind::Folder => self.folder(id).is_some(),
        }
    }

    /// Replace the file collection.
    pub fn set_files(&mut self, files: Vec<File>) {
        self.files = files;
        self.recompute_storage();
    }

    /// Replace the folder collection.
    pub fn set_folders(&mut self, folders: Vec<Folder>) {
        self.folders = folders;
    }

    /// Restore both collections from storage.
    ///
    /// All-or-nothing: both blobs are fetched and parsed before either
    /// collection is replaced. An absent blob leaves its collection as is.
    /// Failures are logged and reported in the outcome, never raised.
    pub async fn load(&mut self) -> LoadOutcome {
        let outcome = match self.fetch().await {
            Ok((None, None)) => LoadOutcome::Empty,
            Ok((files, folders)) => {
                if let Some(files) = files {
                    self.files = files;
                }
                if let Some(folders) = folders {
                    self.folders = folders;
                }
                console::log(&format!(
                    "Restored {} files, {} folders",
                    self.files.len(),
                    self.folders.len()
                ));
                LoadOutcome::Restored {
                    files: self.files.len(),
                    folders: self.folders.len(),
                }
            }
            Err(err) => {
                console::warn(&format!("No existing drive data restored: {}", err));
                LoadOutcome::Failed(err)
            }
        };

        self.recompute_storage();
        outcome
    }

    async fn fetch(&self) -> Result<(Option<Vec<File>>, Option<Vec<Folder>>), DriveError> {
        let files_blob = self.storage.get(FILES_KEY).await?;
        let folders_blob = self.storage.get(FOLDERS_KEY).await?;

        let files = files_blob
            .map(|json| decode::<Vec<File>>(FILES_KEY, &json))
            .transpose()?;
        let folders = folders_blob
            .map(|json| decode::<Vec<Folder>>(FOLDERS_KEY, &json))
            .transpose()?;

        Ok((files, folders))
    }

    /// Assign both collections, then write them to storage.
    pub async fn save(&mut self, files: Vec<File>, folders: Vec<Folder>) -> Result<(), DriveError> {
        self.files = files;
        self.folders = folders;
        self.persist().await
    }

    /// Write the current collections to storage.
    ///
    /// Always writes full snapshots, so overlapping or repeated calls converge
    /// on the last write.
    ///
    /// The two blobs are written one after the other, files first. If the
    /// folders write fails, storage holds the new files beside the previous
    /// folders until the next successful persist; a reload in between sees
    /// that mismatched pair. Retry with [`persist`](Self::persist) to repair it.
    pub async fn persist(&mut self) -> Result<(), DriveError> {
        self.recompute_storage();

        let files_json = serde_json::to_string(&self.files).map_err(DriveError::Encode)?;
        let folders_json = serde_json::to_string(&self.folders).map_err(DriveError::Encode)?;

        let result = self.write_blobs(&files_json, &folders_json).await;
        if let Err(ref err) = result {
            console::warn(&format!("Failed to save drive data: {}", err));
        }
        result
    }

    async fn write_blobs(&self, files_json: &str, folders_json: &str) -> Result<(), DriveError> {
        self.storage.set(FILES_KEY, files_json).await?;
        self.storage.set(FOLDERS_KEY, folders_json).await?;
        Ok(())
    }

    fn recompute_storage(&mut self) {
        self.storage_used = total_size(&self.files);
    }
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Result<T, DriveError> {
    serde_json::from_str(json).map_err(|source| DriveError::Decode {
        key: key.to_string(),
        source,
    })
}

// =============================================================================
// Storage Usage
// =============================================================================

/// Bytes used against the drive quota.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageUsage {
    pub used: u64,
    pub quota: u64,
}

impl StorageUsage {
    pub fn new(used: u64) -> Self {
        Self {
            used,
            quota: STORAGE_QUOTA_BYTES,
        }
    }

    /// Used share of the quota, clamped to `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.quota == 0 {
            return 1.0;
        }
        (self.used as f64 / self.quota as f64).min(1.0)
    }

    /// Used share as a percentage, for the usage meter width.
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

impl fmt::Display for StorageUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} used",
            format_file_size(self.used),
            format_file_size(self.quota)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StorageError;
    use crate::core::storage::MemoryStorage;
    use chrono::DateTime;

    fn file(id: &str, size: u64) -> File {
        File {
            id: id.into(),
            name: format!("{}.bin", id),
            size,
            mime_type: "application/octet-stream".to_string(),
            owner: "me".to_string(),
            location: Default::default(),
            date_modified: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            starred: false,
            shared: false,
        }
    }

    fn folder(id: &str) -> Folder {
        Folder {
            id: id.into(),
            name: id.to_uppercase(),
            parent: None,
            date_created: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            starred: false,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let storage = MemoryStorage::new();
        let files = vec![file("a", 10), file("b", 20)];
        let folders = vec![folder("docs")];

        let mut writer = EntityStore::new(storage.clone());
        writer.save(files.clone(), folders.clone()).await.unwrap();
        assert_eq!(writer.storage_used(), 30);

        let mut reader = EntityStore::new(storage);
        let outcome = reader.load().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Restored {
                files: 2,
                folders: 1
            }
        ));
        assert_eq!(reader.files(), files.as_slice());
        assert_eq!(reader.folders(), folders.as_slice());
        assert_eq!(reader.storage_used(), 30);
    }

    #[tokio::test]
    async fn test_load_empty_storage() {
        let mut store = EntityStore::new(MemoryStorage::new());
        assert!(matches!(store.load().await, LoadOutcome::Empty));
        assert!(store.files().is_empty());
        assert_eq!(store.storage_used(), 0);
    }

    #[tokio::test]
    async fn test_load_malformed_keeps_state() {
        let storage = MemoryStorage::new();
        let mut store = EntityStore::new(storage.clone());
        store.set_files(vec![file("keep", 5)]);

        storage.insert(FILES_KEY, "[]");
        storage.insert(FOLDERS_KEY, "{not json");

        let outcome = store.load().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(DriveError::Decode { ref key, .. }) if key == FOLDERS_KEY
        ));
        // Files blob was valid but nothing is applied on partial failure
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.storage_used(), 5);
    }

    #[tokio::test]
    async fn test_load_read_failure_keeps_state() {
        let storage = MemoryStorage::new();
        let mut store = EntityStore::new(storage.clone());
        store.set_folders(vec![folder("x")]);
        storage.set_fail_reads(true);

        let outcome = store.load().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(DriveError::Storage(StorageError::Read { .. }))
        ));
        assert_eq!(store.folders().len(), 1);
    }

    #[tokio::test]
    async fn test_load_only_files_present() {
        let storage = MemoryStorage::new();
        storage.insert(FILES_KEY, serde_json::to_string(&vec![file("a", 7)]).unwrap());

        let mut store = EntityStore::new(storage);
        store.set_folders(vec![folder("local")]);
        store.load().await;

        assert_eq!(store.files().len(), 1);
        assert_eq!(store.folders().len(), 1);
        assert_eq!(store.storage_used(), 7);
    }

    #[tokio::test]
    async fn test_persist_failure_is_reported() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);

        let mut store = EntityStore::new(storage.clone());
        let result = store.save(vec![file("a", 100)], Vec::new()).await;

        assert!(matches!(result, Err(DriveError::Storage(StorageError::Write { .. }))));
        // In-memory state and accounting still reflect the new value
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.storage_used(), 100);
        assert!(storage.value(FILES_KEY).is_none());
    }

    #[tokio::test]
    async fn test_persist_writes_json_arrays() {
        let storage = MemoryStorage::new();
        let mut store = EntityStore::new(storage.clone());
        store.save(vec![file("a", 1)], vec![folder("f")]).await.unwrap();

        let files: serde_json::Value =
            serde_json::from_str(&storage.value(FILES_KEY).unwrap()).unwrap();
        let folders: serde_json::Value =
            serde_json::from_str(&storage.value(FOLDERS_KEY).unwrap()).unwrap();
        assert_eq!(files.as_array().map(Vec::len), Some(1));
        assert_eq!(files[0]["location"], "My Drive");
        assert_eq!(files[0]["type"], "application/octet-stream");
        assert_eq!(folders[0]["name"], "F");
    }

    /// Fails writes to one key only.
    struct FailingKey<'a> {
        inner: &'a MemoryStorage,
        key: &'static str,
        failing: std::cell::Cell<bool>,
    }

    impl StorageAdapter for FailingKey<'_> {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.failing.get() && key == self.key {
                return Err(StorageError::write(key, "quota exceeded"));
            }
            self.inner.set(key, value).await
        }
    }

    #[tokio::test]
    async fn test_folders_write_failure_leaves_files_ahead_until_retry() {
        let storage = MemoryStorage::new();
        let adapter = FailingKey {
            inner: &storage,
            key: FOLDERS_KEY,
            failing: std::cell::Cell::new(true),
        };
        let mut store = EntityStore::new(&adapter);

        let result = store.save(vec![file("a", 1)], vec![folder("x")]).await;
        assert!(matches!(
            result,
            Err(DriveError::Storage(StorageError::Write { ref key, .. })) if key == FOLDERS_KEY
        ));
        assert!(storage.value(FILES_KEY).unwrap().contains("a.bin"));
        assert!(storage.value(FOLDERS_KEY).is_none());

        adapter.failing.set(false);
        store.persist().await.unwrap();

        let mut reader = EntityStore::new(storage);
        reader.load().await;
        assert_eq!(reader.files().len(), 1);
        assert_eq!(reader.folders().len(), 1);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut store = EntityStore::new(MemoryStorage::new());
        store.set_files(vec![file("a", 1)]);
        store.set_folders(vec![folder("f")]);

        assert!(store.contains(&"a".into(), EntityKind::File));
        assert!(!store.contains(&"a".into(), EntityKind::Folder));
        assert!(store.folder(&"f".into()).is_some());
        assert!(store.file(&"missing".into()).is_none());
    }

    #[test]
    fn test_storage_usage_display() {
        let usage = StorageUsage::new(2048);
        assert_eq!(usage.to_string(), "2 KB of 15 GB used");
        assert!(usage.fraction() > 0.0 && usage.fraction() < 1e-6);

        let full = StorageUsage::new(u64::MAX);
        assert_eq!(full.fraction(), 1.0);
        assert_eq!(full.percent(), 100.0);
    }

    #[test]
    fn test_total_size_saturates() {
        assert_eq!(total_size(&[]), 0);
        assert_eq!(total_size(&[file("a", u64::MAX), file("b", 1)]), u64::MAX);
    }
}
