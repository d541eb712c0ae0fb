//! Contact record persisted by the contact store.
//!
//! A contact is keyed by its `name`. Lookups compare names ignoring case,
//! while duplicate checks and removals compare the raw strings. Both rules
//! live here so every store adapter applies them the same way.

use serde::{Deserialize, Serialize};

/// A single address-book entry.
///
/// The store does not validate these fields; form validation happens before
/// a contact reaches the store.
///
/// # Examples
/// ```
/// use contact_book::domain::Contact;
///
/// let contact = Contact::new("Budi", "budi@x.com", "081234567890");
/// assert!(contact.name_matches_ignoring_case("budi"));
/// assert!(!contact.has_name("budi"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Natural key of the contact.
    pub name: String,
    /// Email address as submitted.
    pub email: String,
    /// Mobile phone number as submitted.
    pub phone: String,
}

impl Contact {
    /// Build a contact from its three fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Whether this contact's name equals `name` exactly.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Whether this contact's name equals `name` once both are lowercased.
    #[must_use]
    pub fn name_matches_ignoring_case(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Replacement of the contact currently stored under `old_name`.
///
/// `old_name` only identifies the record being replaced and is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    /// Exact name of the record being replaced.
    pub old_name: String,
    /// New contents for the record.
    pub contact: Contact,
}

impl ContactUpdate {
    /// Pair a replacement contact with the name it replaces.
    #[must_use]
    pub fn new(old_name: impl Into<String>, contact: Contact) -> Self {
        Self {
            old_name: old_name.into(),
            contact,
        }
    }
}
