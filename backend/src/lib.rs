//! Wall library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, ports and
//! the [`domain::WallService`]; [`outbound`] adapts the `wall-store` crate to
//! the persistence port; [`inbound`] holds the command-line view.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::WallSettings;
