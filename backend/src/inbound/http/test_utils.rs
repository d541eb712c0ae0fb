//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;

use super::state::HttpState;
use crate::domain::Contact;
use crate::outbound::persistence::InMemoryContactStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State over an in-memory store seeded with `contacts`, plus the store for
/// inspecting writes.
pub fn seeded_state(contacts: Vec<Contact>) -> (web::Data<HttpState>, Arc<InMemoryContactStore>) {
    let store = Arc::new(InMemoryContactStore::with_contacts(contacts));
    let state = web::Data::new(HttpState::new(store.clone()));
    (state, store)
}

/// The `session` cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
