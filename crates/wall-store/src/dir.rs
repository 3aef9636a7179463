//! Directory-backed store: one JSON document per record.

use std::io;
use std::sync::{Mutex, MutexGuard};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use tracing::debug;

use crate::atomic_io::replace_file;
use crate::error::StoreError;
use crate::key::RecordKey;
use crate::store::KeyValueStore;

/// Stores each record as `<root>/<key>.json`.
///
/// All file access goes through a capability handle on `root`, so records can
/// never be read or written outside it. Writes and removals are serialised by
/// an internal lock and every write replaces the file atomically.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use serde_json::json;
/// use wall_store::{DirStore, KeyValueStore, RecordKey};
///
/// let temp = tempfile::tempdir().expect("temp dir");
/// let root = Utf8PathBuf::from_path_buf(temp.path().join("wall")).expect("utf-8 path");
///
/// let store = DirStore::open(&root).expect("open store");
/// let key = RecordKey::new("users").expect("valid key");
/// store.set(&key, &json!([{"username": "ana"}])).expect("write");
///
/// let reopened = DirStore::open(&root).expect("reopen store");
/// assert_eq!(
///     reopened.get(&key).expect("read"),
///     Some(json!([{"username": "ana"}]))
/// );
/// ```
#[derive(Debug)]
pub struct DirStore {
    root: Utf8PathBuf,
    dir: Dir,
    write_lock: Mutex<()>,
}

impl DirStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, StoreError> {
        let open_error = |err: io::Error| StoreError::Open {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        debug!(root = %root, "opened record store");
        Ok(Self {
            root: root.to_path_buf(),
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.root.as_path()
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn unavailable(key: &RecordKey, err: &io::Error) -> StoreError {
    StoreError::Unavailable {
        key: key.as_str().to_owned(),
        message: err.to_string(),
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &RecordKey) -> Result<Option<Value>, StoreError> {
        let contents = match self.dir.read_to_string(key.file_name()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(unavailable(key, &err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| StoreError::Corrupt {
                key: key.as_str().to_owned(),
                message: err.to_string(),
            })
    }

    fn set(&self, key: &RecordKey, value: &Value) -> Result<(), StoreError> {
        let contents = value.to_string();
        let _guard = self.lock_writes()?;
        replace_file(&self.dir, &key.file_name(), &contents)
            .map_err(|err| unavailable(key, &err))?;
        debug!(record = %key, bytes = contents.len(), "record written");
        Ok(())
    }

    fn remove(&self, key: &RecordKey) -> Result<(), StoreError> {
        let _guard = self.lock_writes()?;
        match self.dir.remove_file(key.file_name()) {
            Ok(()) => {
                debug!(record = %key, "record removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(unavailable(key, &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    struct Scratch {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn scratch() -> Scratch {
        let temp = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("records"))
            .expect("temp dir path is UTF-8");
        Scratch { _temp: temp, root }
    }

    fn key(name: &str) -> RecordKey {
        RecordKey::new(name).expect("valid key")
    }

    #[rstest]
    fn open_creates_missing_directories(scratch: Scratch) {
        let nested = scratch.root.join("a").join("b");
        let store = DirStore::open(&nested).expect("open nested store");
        assert_eq!(store.root(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[rstest]
    fn missing_record_reads_as_none(scratch: Scratch) {
        let store = DirStore::open(&scratch.root).expect("open store");
        assert_eq!(store.get(&key("posts")).expect("read"), None);
    }

    #[rstest]
    fn records_survive_reopening(scratch: Scratch) {
        let value = json!({"id": "42", "username": "ana"});
        {
            let store = DirStore::open(&scratch.root).expect("open store");
            store.set(&key("currentSession"), &value).expect("write");
        }

        let reopened = DirStore::open(&scratch.root).expect("reopen store");
        assert_eq!(reopened.get(&key("currentSession")).expect("read"), Some(value));
    }

    #[rstest]
    fn records_are_stored_as_named_json_files(scratch: Scratch) {
        let store = DirStore::open(&scratch.root).expect("open store");
        store.set(&key("users"), &json!([])).expect("write");

        let contents =
            std::fs::read_to_string(scratch.root.join("users.json")).expect("read file directly");
        assert_eq!(contents, "[]");
    }

    #[rstest]
    fn remove_is_idempotent(scratch: Scratch) {
        let store = DirStore::open(&scratch.root).expect("open store");
        store.set(&key("currentSession"), &json!({})).expect("write");

        store.remove(&key("currentSession")).expect("first remove");
        store.remove(&key("currentSession")).expect("second remove");
        assert_eq!(store.get(&key("currentSession")).expect("read"), None);
    }

    #[rstest]
    fn unparsable_record_is_reported_as_corrupt(scratch: Scratch) {
        let store = DirStore::open(&scratch.root).expect("open store");
        std::fs::write(scratch.root.join("posts.json"), "{not json").expect("seed corrupt file");

        let result = store.get(&key("posts"));
        assert!(matches!(result, Err(StoreError::Corrupt { ref key, .. }) if key == "posts"));
    }

    #[rstest]
    fn open_fails_when_root_is_a_file(scratch: Scratch) {
        std::fs::create_dir_all(&scratch.root).expect("create parent");
        let file_path = scratch.root.join("occupied");
        std::fs::write(&file_path, "x").expect("create blocking file");

        let result = DirStore::open(&file_path);
        assert!(matches!(result, Err(StoreError::Open { .. })));
    }
}
