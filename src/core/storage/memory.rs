use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::StorageAdapter;
use crate::core::error::StorageError;

/// In-process storage backend.
///
/// Clones share the same underlying map, so a test can hand one clone to a
/// drive and inspect what was written through another. Reads and writes can
/// be switched to fail to exercise error paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through the async interface.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.into(), value.into());
    }

    /// Current value under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl StorageAdapter for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(StorageError::read(key, "reads disabled"));
        }
        Ok(inner.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::write(key, "writes disabled"));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}
