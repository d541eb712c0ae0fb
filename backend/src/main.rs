//! Contact book entry-point: loads settings, opens the JSON file store and
//! serves the HTML pages.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_book::inbound::http::health::HealthState;
use contact_book::inbound::http::session_key::{BuildMode, load_session_key};
use contact_book::outbound::persistence::JsonFileContactStore;
use contact_book::settings::ContactBookSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ContactBookSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid host {}: {e}", settings.host())))?;

    let key = load_session_key(
        settings.session_key_file.as_deref(),
        settings.session_allow_ephemeral,
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;

    let store = JsonFileContactStore::open(settings.data_dir(), settings.data_file())
        .map_err(std::io::Error::other)?;
    info!(path = %store.file_path().display(), %bind_addr, "starting contact book");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure, bind_addr, Arc::new(store.clone()));
    let server = create_server(health_state.clone(), config)?;

    let result = server.await;
    health_state.mark_unhealthy();
    store.close();
    result
}
