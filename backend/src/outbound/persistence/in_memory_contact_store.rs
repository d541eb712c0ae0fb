//! In-memory contact store.
//!
//! Satisfies the same [`ContactStore`] contract as the JSON file store so
//! handlers and services can be exercised without touching the filesystem.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::Contact;
use crate::domain::ports::{ContactStore, ContactStoreError};

/// Contact store holding the collection in a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    contacts: Mutex<Vec<Contact>>,
}

impl InMemoryContactStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `contacts`.
    #[must_use]
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Mutex::new(contacts),
        }
    }

    /// Copy of the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Contact> {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn load_all(&self) -> Result<Vec<Contact>, ContactStoreError> {
        Ok(self.snapshot())
    }

    async fn save_all(&self, contacts: Vec<Contact>) -> Result<(), ContactStoreError> {
        *self.contacts.lock().unwrap_or_else(PoisonError::into_inner) = contacts;
        Ok(())
    }
}
