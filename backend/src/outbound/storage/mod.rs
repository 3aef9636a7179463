//! Persistent store adapter backed by the `wall-store` crate.
//!
//! The adapter translates [`WallRecord`] names into store keys and folds the
//! store's error variants into the two categories the domain understands.
//! Any [`KeyValueStore`] works: `DirStore` in the binary, `MemoryStore` in
//! tests.

use serde_json::Value;
use tracing::debug;
use wall_store::{KeyValueStore, RecordKey, StoreError};

use crate::domain::ports::{PersistentStore, PersistentStoreError, WallRecord};

/// [`PersistentStore`] implementation over a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wall::domain::ports::{PersistentStore, WallRecord};
/// use wall::outbound::storage::KeyValuePersistentStore;
/// use wall_store::MemoryStore;
///
/// let store = KeyValuePersistentStore::new(MemoryStore::new());
/// store.write(WallRecord::Posts, &json!([]))?;
/// assert_eq!(store.read(WallRecord::Posts)?, Some(json!([])));
/// # Ok::<(), wall::domain::ports::PersistentStoreError>(())
/// ```
#[derive(Debug)]
pub struct KeyValuePersistentStore<S> {
    inner: S,
}

impl<S> KeyValuePersistentStore<S> {
    /// Wrap a key/value store.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn record_key(record: WallRecord) -> Result<RecordKey, PersistentStoreError> {
    RecordKey::new(record.as_str()).map_err(|err| map_store_error(record, err))
}

fn map_store_error(record: WallRecord, error: StoreError) -> PersistentStoreError {
    debug!(%record, error = %error, "key/value store operation failed");
    match error {
        StoreError::Corrupt { message, .. } => PersistentStoreError::corrupt(record, message),
        StoreError::Unavailable { message, .. } | StoreError::Open { message, .. } => {
            PersistentStoreError::unavailable(record, message)
        }
        other => PersistentStoreError::unavailable(record, other.to_string()),
    }
}

impl<S> PersistentStore for KeyValuePersistentStore<S>
where
    S: KeyValueStore,
{
    fn read(&self, record: WallRecord) -> Result<Option<Value>, PersistentStoreError> {
        let key = record_key(record)?;
        self.inner
            .get(&key)
            .map_err(|err| map_store_error(record, err))
    }

    fn write(&self, record: WallRecord, value: &Value) -> Result<(), PersistentStoreError> {
        let key = record_key(record)?;
        self.inner
            .set(&key, value)
            .map_err(|err| map_store_error(record, err))
    }

    fn clear(&self, record: WallRecord) -> Result<(), PersistentStoreError> {
        let key = record_key(record)?;
        self.inner
            .remove(&key)
            .map_err(|err| map_store_error(record, err))
    }
}
