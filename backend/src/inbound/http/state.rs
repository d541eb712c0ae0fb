//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the contact book use-cases and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ContactBookService;
use crate::domain::ports::ContactStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Contact book use-cases.
    pub contacts: ContactBookService,
}

impl HttpState {
    /// Build state over the given contact store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use contact_book::inbound::http::state::HttpState;
    /// use contact_book::outbound::persistence::InMemoryContactStore;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryContactStore::new()));
    /// let _service = state.contacts.clone();
    /// ```
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            contacts: ContactBookService::new(store),
        }
    }
}
