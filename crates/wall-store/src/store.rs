//! The key/value contract shared by every store backend.

use std::sync::Arc;

use serde_json::Value;

use crate::error::StoreError;
use crate::key::RecordKey;

/// Durable storage of named JSON records.
///
/// Each call is atomic for the single record it touches. There are no
/// multi-record transactions; callers that need read-modify-write semantics
/// must serialise those sequences themselves.
pub trait KeyValueStore: Send + Sync {
    /// Reads a record, returning `None` when it has never been written or has
    /// been removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the medium cannot be read or the record is
    /// not valid JSON.
    fn get(&self, key: &RecordKey) -> Result<Option<Value>, StoreError>;

    /// Replaces a record with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the medium rejects the write.
    fn set(&self, key: &RecordKey, value: &Value) -> Result<(), StoreError>;

    /// Removes a record. Removing an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the medium rejects the removal.
    fn remove(&self, key: &RecordKey) -> Result<(), StoreError>;
}

impl<T> KeyValueStore for Arc<T>
where
    T: KeyValueStore + ?Sized,
{
    fn get(&self, key: &RecordKey) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &RecordKey, value: &Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &RecordKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
