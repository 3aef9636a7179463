//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
mod persistent_store;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use persistent_store::MockPersistentStore;
pub use persistent_store::{
    InMemoryPersistentStore, PersistentStore, PersistentStoreError, WallRecord,
};
