//! One-shot flash messages stored in the session cookie.
//!
//! A mutation handler pushes a message before redirecting; the next page that
//! renders flash messages takes them, which also clears them.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Flash shown after a contact is added.
pub const CONTACT_ADDED: &str = "Contact added!";
/// Flash shown after a contact is updated.
pub const CONTACT_UPDATED: &str = "Contact updated!";
/// Flash shown after a contact is deleted.
pub const CONTACT_DELETED: &str = "Contact deleted!";

/// Session-backed queue of flash messages.
#[derive(Clone)]
pub struct FlashMessages(Session);

impl FlashMessages {
    /// Wrap the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    fn pending(&self) -> Result<Vec<String>, Error> {
        self.0
            .get::<Vec<String>>(FLASH_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read flash messages: {error}")))
    }

    /// Queue `message` for the next rendered page.
    pub fn push(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut messages = self.pending()?;
        messages.push(message.into());
        self.0
            .insert(FLASH_KEY, messages)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Return and clear every queued message.
    pub fn take(&self) -> Result<Vec<String>, Error> {
        let messages = self.pending()?;
        if !messages.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        Ok(messages)
    }
}

impl FromRequest for FlashMessages {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashMessages::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[actix_web::test]
    async fn messages_survive_exactly_one_read() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|flash: FlashMessages| async move {
                        flash.push("saved")?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|flash: FlashMessages| async move {
                        let messages = flash.take()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(messages.join(",")))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let first = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let cleared = session_cookie(&first);
        assert_eq!(test::read_body(first).await, "saved");

        let mut again = test::TestRequest::get().uri("/take");
        if let Some(cookie) = cleared {
            again = again.cookie(cookie);
        }
        let second = test::call_service(&app, again.to_request()).await;
        assert_eq!(test::read_body(second).await, "");
    }
}
