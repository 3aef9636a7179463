//! Process-local store used by tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::error::StoreError;
use crate::key::RecordKey;
use crate::store::KeyValueStore;

/// Keeps records in memory for the lifetime of the value.
///
/// [`MemoryStore::set_unavailable`] makes every subsequent call fail with
/// [`StoreError::Unavailable`], which lets callers exercise the path where the
/// medium is full or missing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<RecordKey, Value>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the simulated outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of records currently held.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether no records are held.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn check_available(&self, key: &RecordKey) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                key: key.as_str().to_owned(),
                message: "memory store marked unavailable".to_owned(),
            });
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<RecordKey, Value>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &RecordKey) -> Result<Option<Value>, StoreError> {
        self.check_available(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &RecordKey, value: &Value) -> Result<(), StoreError> {
        self.check_available(key)?;
        self.lock()?.insert(key.clone(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &RecordKey) -> Result<(), StoreError> {
        self.check_available(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}
