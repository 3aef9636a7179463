//! Durable JSON key/value records backing the wall service.
//!
//! This crate stands in for the host's persistent local storage. Each record
//! is addressed by a validated [`RecordKey`] and holds a single JSON value. The
//! crate knows nothing about backend domain types; the domain reaches it
//! through its own port.
//!
//! # Overview
//!
//! - [`KeyValueStore`]: the get/set/remove contract shared by all backends
//! - [`DirStore`]: one JSON file per record in a capability-scoped directory,
//!   replaced atomically on every write
//! - [`MemoryStore`]: a process-local map for tests and ephemeral runs, with a
//!   switch that simulates an unavailable medium
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wall_store::{KeyValueStore, MemoryStore, RecordKey};
//!
//! let store = MemoryStore::new();
//! let key = RecordKey::new("posts").expect("valid key");
//!
//! store.set(&key, &json!([])).expect("write succeeds");
//! assert_eq!(store.get(&key).expect("read succeeds"), Some(json!([])));
//!
//! store.remove(&key).expect("remove succeeds");
//! assert_eq!(store.get(&key).expect("read succeeds"), None);
//! ```

mod atomic_io;
mod dir;
mod error;
mod key;
mod memory;
mod store;

pub use dir::DirStore;
pub use error::StoreError;
pub use key::{RECORD_KEY_MAX, RecordKey};
pub use memory::MemoryStore;
pub use store::KeyValueStore;
