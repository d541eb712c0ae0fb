//! HTTP inbound adapter serving the contact book pages.

pub mod contacts;
pub mod error;
pub mod flash;
pub mod health;
pub mod pages;
pub mod session_key;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::HandlerResult;

/// Register every page route and the 404 fallback.
///
/// Callers provide `web::Data<HttpState>`, `web::Data<HealthState>` and a
/// session middleware.
///
/// [`HttpState`]: state::HttpState
/// [`HealthState`]: health::HealthState
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::about)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(contacts::add_contact_form)
        .service(contacts::edit_contact_form)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(contacts::contact_detail)
        .service(health::ready)
        .service(health::live)
        .default_service(web::to(pages::not_found));
}
