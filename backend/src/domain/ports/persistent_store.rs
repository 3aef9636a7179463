//! Port for the durable records behind the wall.
//!
//! The wall keeps three independent records. Adapters decide where the bytes
//! live; the domain only sees JSON values and two failure categories.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use serde_json::Value;

use super::define_port_error;

/// The records persisted by the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallRecord {
    /// JSON array of every registered user.
    Users,
    /// JSON array of every post, newest first.
    Posts,
    /// The signed-in user, absent when nobody is signed in.
    CurrentSession,
}

impl WallRecord {
    /// Stable record name used as the storage key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::CurrentSession => "currentSession",
        }
    }
}

impl fmt::Display for WallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by persistent store adapters.
    pub enum PersistentStoreError {
        /// The medium is missing, full, or otherwise refused the operation.
        Unavailable { record: WallRecord, message: String } =>
            "storage unavailable for '{record}': {message}",
        /// The record exists but cannot be decoded.
        Corrupt { record: WallRecord, message: String } =>
            "stored '{record}' record is unreadable: {message}",
    }
}

/// Durable get/set/remove of the wall's records.
///
/// Each call is atomic for one record. Callers serialise read-modify-write
/// sequences themselves.
#[cfg_attr(test, mockall::automock)]
pub trait PersistentStore: Send + Sync {
    /// Read a record; `None` when it was never written or has been cleared.
    fn read(&self, record: WallRecord) -> Result<Option<Value>, PersistentStoreError>;

    /// Replace a record.
    fn write(&self, record: WallRecord, value: &Value) -> Result<(), PersistentStoreError>;

    /// Remove a record. Clearing an absent record succeeds.
    fn clear(&self, record: WallRecord) -> Result<(), PersistentStoreError>;
}

/// In-memory store for exercising the domain without an adapter.
#[derive(Debug, Default)]
pub struct InMemoryPersistentStore {
    records: Mutex<BTreeMap<WallRecord, Value>>,
}

impl InMemoryPersistentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(
        &self,
        record: WallRecord,
        f: impl FnOnce(&mut BTreeMap<WallRecord, Value>) -> T,
    ) -> Result<T, PersistentStoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| PersistentStoreError::unavailable(record, "store lock poisoned"))?;
        Ok(f(&mut records))
    }
}

impl PersistentStore for InMemoryPersistentStore {
    fn read(&self, record: WallRecord) -> Result<Option<Value>, PersistentStoreError> {
        self.with_records(record, |records| records.get(&record).cloned())
    }

    fn write(&self, record: WallRecord, value: &Value) -> Result<(), PersistentStoreError> {
        self.with_records(record, |records| {
            records.insert(record, value.clone());
        })
    }

    fn clear(&self, record: WallRecord) -> Result<(), PersistentStoreError> {
        self.with_records(record, |records| {
            records.remove(&record);
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(WallRecord::Users, "users")]
    #[case(WallRecord::Posts, "posts")]
    #[case(WallRecord::CurrentSession, "currentSession")]
    fn record_names_are_stable(#[case] record: WallRecord, #[case] expected: &str) {
        assert_eq!(record.as_str(), expected);
        assert_eq!(record.to_string(), expected);
    }

    #[rstest]
    fn errors_name_the_record() {
        let err = PersistentStoreError::unavailable(WallRecord::Posts, "disk full");
        assert_eq!(err.to_string(), "storage unavailable for 'posts': disk full");

        let err = PersistentStoreError::corrupt(WallRecord::Users, "expected array");
        assert_eq!(
            err.to_string(),
            "stored 'users' record is unreadable: expected array"
        );
    }

    #[rstest]
    fn in_memory_store_reads_back_writes_and_clears() {
        let store = InMemoryPersistentStore::new();
        assert_eq!(store.read(WallRecord::CurrentSession), Ok(None));

        store
            .write(WallRecord::CurrentSession, &json!({"username": "ana"}))
            .expect("write");
        assert_eq!(
            store.read(WallRecord::CurrentSession),
            Ok(Some(json!({"username": "ana"})))
        );

        store.clear(WallRecord::CurrentSession).expect("clear");
        store.clear(WallRecord::CurrentSession).expect("clear again");
        assert_eq!(store.read(WallRecord::CurrentSession), Ok(None));
    }
}
