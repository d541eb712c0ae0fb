//! Contact persistence adapters.
//!
//! # Architecture
//!
//! - **Thin adapters**: implementations only provide whole-collection load
//!   and save; lookup and mutation rules come from the
//!   [`ContactStore`](crate::domain::ports::ContactStore) port.
//! - **Swappable**: handlers hold `Arc<dyn ContactStore>`, so the JSON file
//!   store and the in-memory store are interchangeable.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use contact_book::domain::ContactBookService;
//! use contact_book::outbound::persistence::JsonFileContactStore;
//!
//! let store = JsonFileContactStore::open("data", "contacts.json").expect("open store");
//! let service = ContactBookService::new(Arc::new(store));
//! ```

mod atomic_write;
mod in_memory_contact_store;
mod json_file_contact_store;

pub use in_memory_contact_store::InMemoryContactStore;
pub use json_file_contact_store::{DEFAULT_DATA_DIR, DEFAULT_DATA_FILE, JsonFileContactStore};
