//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_store;

#[cfg(test)]
pub use contact_store::MockContactStore;
pub use contact_store::{ContactStore, ContactStoreError};
