//! Domain primitives and use-cases.
//!
//! Purpose: Define the contact entity, form validation and the contact book
//! service. Nothing here depends on actix; adapters translate at the edges.
//!
//! Public surface:
//! - Contact / ContactUpdate — the persisted record and its replacement.
//! - ContactForm, validate_contact_form, ValidationReport — pure validation.
//! - ContactBookService — use-cases driven by the HTTP adapter.
//! - Error / ErrorCode — transport-agnostic failures.

pub mod contact;
pub mod contact_book_service;
pub mod error;
pub mod ports;
pub mod validation;

pub use self::contact::{Contact, ContactUpdate};
pub use self::contact_book_service::{ContactBookService, DeletionOutcome, SubmissionOutcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::validation::{
    ContactField, ContactForm, DUPLICATE_NAME_MESSAGE, EMPTY_NAME_MESSAGE, FieldError,
    INVALID_EMAIL_MESSAGE, INVALID_PHONE_MESSAGE, ValidationReport, is_indonesian_mobile,
    is_valid_email, validate_contact_form,
};
