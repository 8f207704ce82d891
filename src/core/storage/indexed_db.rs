use idb::{Database, DatabaseEvent, Factory, ObjectStoreParams, TransactionMode};
use wasm_bindgen::JsValue;

use super::StorageAdapter;
use crate::config::indexed_db::{DATABASE, STORE, VERSION};
use crate::core::error::StorageError;
use crate::utils::console;

/// Storage backend over an IndexedDB object store.
///
/// Values are stored as plain strings keyed by the storage key, so the blobs
/// are byte-identical to what [`WebStorage`](super::WebStorage) writes.
pub struct IndexedDbStorage {
    db: Database,
}

impl IndexedDbStorage {
    /// Open (and on first use, create) the drive database.
    pub async fn open() -> Result<Self, StorageError> {
        let factory = Factory::new().map_err(|_| StorageError::Unavailable)?;
        let mut request = factory
            .open(DATABASE, Some(VERSION))
            .map_err(|e| StorageError::read(DATABASE, e.to_string()))?;

        request.on_upgrade_needed(|event| {
            let db = match event.database() {
                Ok(db) => db,
                Err(e) => {
                    console::warn(&format!("IndexedDB upgrade failed: {}", e));
                    return;
                }
            };
            if db.store_names().iter().any(|name| name == STORE) {
                return;
            }
            if let Err(e) = db.create_object_store(STORE, ObjectStoreParams::new()) {
                console::warn(&format!("IndexedDB store creation failed: {}", e));
            }
        });

        let db = request
            .await
            .map_err(|e| StorageError::read(DATABASE, e.to_string()))?;
        Ok(Self { db })
    }
}

impl StorageAdapter for IndexedDbStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_err = |e: idb::Error| StorageError::read(key, e.to_string());

        let transaction = self
            .db
            .transaction(&[STORE], TransactionMode::ReadOnly)
            .map_err(read_err)?;
        let store = transaction.object_store(STORE).map_err(read_err)?;
        let value: Option<JsValue> = store
            .get(JsValue::from_str(key))
            .map_err(read_err)?
            .await
            .map_err(read_err)?;
        transaction.await.map_err(read_err)?;

        Ok(value.and_then(|v| v.as_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |e: idb::Error| StorageError::write(key, e.to_string());

        let transaction = self
            .db
            .transaction(&[STORE], TransactionMode::ReadWrite)
            .map_err(write_err)?;
        let store = transaction.object_store(STORE).map_err(write_err)?;
        store
            .put(&JsValue::from_str(value), Some(&JsValue::from_str(key)))
            .map_err(write_err)?
            .await
            .map_err(write_err)?;
        transaction
            .commit()
            .map_err(write_err)?
            .await
            .map_err(write_err)?;

        Ok(())
    }
}
