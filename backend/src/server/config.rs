//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::Key;
use contact_book::domain::ports::ContactStore;

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<dyn ContactStore>,
}

impl ServerConfig {
    /// Construct a server configuration over an opened contact store.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        store: Arc<dyn ContactStore>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            store,
        }
    }
}
