//! Contact book use-cases driven by the HTTP adapter.
//!
//! The service owns the sequencing the handlers need: duplicate check, then
//! validation, then the store mutation. Validation failures are returned as
//! data; only storage failures become a domain [`Error`].

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{ContactStore, ContactStoreError};
use crate::domain::{Contact, ContactForm, Error, ValidationReport, validate_contact_form};

/// Result of submitting an add or edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The contact was written to the store.
    Saved,
    /// Validation rejected the form; the store was not touched.
    Rejected(ValidationReport),
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// A contact matched the lookup; `removed` exact-name records were dropped.
    Deleted {
        /// Number of records removed by the exact-name filter.
        removed: usize,
    },
    /// No contact matched the lookup.
    NotFound,
}

/// Contact book service backed by a [`ContactStore`].
#[derive(Clone)]
pub struct ContactBookService {
    store: Arc<dyn ContactStore>,
}

impl ContactBookService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    fn map_store_error(err: ContactStoreError) -> Error {
        error!(error = %err, "contact store operation failed");
        Error::internal(format!("contact store failure: {err}"))
    }

    /// Every contact in persisted order.
    pub async fn list(&self) -> Result<Vec<Contact>, Error> {
        self.store.load_all().await.map_err(Self::map_store_error)
    }

    /// Look up a contact by name ignoring case.
    pub async fn find(&self, name: &str) -> Result<Option<Contact>, Error> {
        self.store.find(name).await.map_err(Self::map_store_error)
    }

    /// Validate and add a new contact.
    ///
    /// Any `old_name` on the form is ignored: a new contact never excuses a
    /// duplicate.
    pub async fn create(&self, form: ContactForm) -> Result<SubmissionOutcome, Error> {
        let form = ContactForm {
            old_name: None,
            ..form
        };
        if let Some(report) = self.check(&form).await? {
            return Ok(SubmissionOutcome::Rejected(report));
        }
        let contact = form.into_contact();
        info!(name = %contact.name, "adding contact");
        self.store
            .add(contact)
            .await
            .map_err(Self::map_store_error)?;
        Ok(SubmissionOutcome::Saved)
    }

    /// Validate and replace the contact named by the form's `old_name`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when `old_name` is
    /// missing and [`crate::domain::ErrorCode::InternalError`] when the store
    /// fails.
    pub async fn update(&self, form: ContactForm) -> Result<SubmissionOutcome, Error> {
        if form.old_name.is_none() {
            return Err(Error::invalid_request("oldName is required to edit a contact")
                .with_details(json!({ "field": "oldName", "code": "missing_field" })));
        }
        if let Some(report) = self.check(&form).await? {
            return Ok(SubmissionOutcome::Rejected(report));
        }
        let Some(update) = form.into_update() else {
            return Err(Error::internal("edit form lost its oldName"));
        };
        info!(old_name = %update.old_name, name = %update.contact.name, "updating contact");
        self.store
            .update(update)
            .await
            .map_err(Self::map_store_error)?;
        Ok(SubmissionOutcome::Saved)
    }

    /// Delete a contact.
    ///
    /// The existence check ignores case but the removal matches the exact
    /// name, so `delete("budi")` finds `"Budi"` yet removes nothing.
    pub async fn delete(&self, name: &str) -> Result<DeletionOutcome, Error> {
        if self.find(name).await?.is_none() {
            debug!(name, "delete requested for unknown contact");
            return Ok(DeletionOutcome::NotFound);
        }
        let removed = self
            .store
            .delete(name)
            .await
            .map_err(Self::map_store_error)?;
        info!(name, removed, "deleted contact");
        Ok(DeletionOutcome::Deleted { removed })
    }

    async fn check(&self, form: &ContactForm) -> Result<Option<ValidationReport>, Error> {
        let duplicate = self
            .store
            .check_duplicate(&form.name)
            .await
            .map_err(Self::map_store_error)?;
        let report = validate_contact_form(form, duplicate.as_ref());
        if report.is_valid() {
            Ok(None)
        } else {
            debug!(name = %form.name, errors = report.errors().len(), "contact form rejected");
            Ok(Some(report))
        }
    }
}

#[cfg(test)]
#[path = "contact_book_service_tests.rs"]
mod tests;
