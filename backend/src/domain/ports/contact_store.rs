//! Port abstraction for contact persistence adapters and their errors.
//!
//! Every operation is a whole-collection read followed, for mutations, by a
//! whole-collection rewrite. Adapters only provide `load_all` and `save_all`;
//! the lookup and mutation rules are shared default methods so the file and
//! in-memory stores cannot drift apart.

use async_trait::async_trait;

use crate::domain::{Contact, ContactUpdate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact store adapters.
    pub enum ContactStoreError {
        /// Reading or writing the backing file failed.
        Io { path: String, message: String } =>
            "contact store I/O failed at '{path}': {message}",
        /// The backing file does not hold a JSON array of contacts.
        Parse { message: String } => "contact store holds invalid JSON: {message}",
        /// The blocking worker running the operation did not complete.
        Task { message: String } => "contact store task failed: {message}",
    }
}

/// Port for loading and rewriting the contact collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Return every stored contact in persisted order.
    async fn load_all(&self) -> Result<Vec<Contact>, ContactStoreError>;

    /// Replace the whole collection.
    async fn save_all(&self, contacts: Vec<Contact>) -> Result<(), ContactStoreError>;

    /// First contact whose name matches `name` ignoring case.
    async fn find(&self, name: &str) -> Result<Option<Contact>, ContactStoreError> {
        let contacts = self.load_all().await?;
        Ok(contacts
            .into_iter()
            .find(|contact| contact.name_matches_ignoring_case(name)))
    }

    /// First contact whose name equals `name` exactly.
    async fn check_duplicate(&self, name: &str) -> Result<Option<Contact>, ContactStoreError> {
        let contacts = self.load_all().await?;
        Ok(contacts.into_iter().find(|contact| contact.has_name(name)))
    }

    /// Append `contact` without validating it.
    async fn add(&self, contact: Contact) -> Result<(), ContactStoreError> {
        let mut contacts = self.load_all().await?;
        contacts.push(contact);
        self.save_all(contacts).await
    }

    /// Remove every contact named exactly `name`. Returns how many were removed.
    ///
    /// Nothing is written when no contact matches.
    async fn delete(&self, name: &str) -> Result<usize, ContactStoreError> {
        let mut contacts = self.load_all().await?;
        let before = contacts.len();
        contacts.retain(|contact| !contact.has_name(name));
        let removed = before - contacts.len();
        if removed > 0 {
            self.save_all(contacts).await?;
        }
        Ok(removed)
    }

    /// Remove every contact named exactly `update.old_name` and append the
    /// replacement at the end of the collection.
    async fn update(&self, update: ContactUpdate) -> Result<(), ContactStoreError> {
        let ContactUpdate { old_name, contact } = update;
        let mut contacts = self.load_all().await?;
        contacts.retain(|existing| !existing.has_name(&old_name));
        contacts.push(contact);
        self.save_all(contacts).await
    }
}
