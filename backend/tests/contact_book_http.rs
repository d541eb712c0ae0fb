//! End-to-end tests driving the HTML pages against a JSON file store.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use contact_book::Trace;
use contact_book::domain::Contact;
use contact_book::domain::ports::ContactStore;
use contact_book::inbound::http::configure;
use contact_book::inbound::http::health::HealthState;
use contact_book::inbound::http::state::HttpState;
use contact_book::middleware::TRACE_ID_HEADER;
use contact_book::outbound::persistence::JsonFileContactStore;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    store: JsonFileContactStore,
    state: web::Data<HttpState>,
}

#[fixture]
fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let store =
        JsonFileContactStore::open(dir.path().join("data"), "contacts.json").expect("open store");
    let state = web::Data::new(HttpState::new(Arc::new(store.clone())));
    Harness {
        _dir: dir,
        store,
        state,
    }
}

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data($harness.state.clone())
                .app_data(web::Data::new(HealthState::new()))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .wrap(Trace)
                .configure(configure),
        )
        .await
    };
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn body_text<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

fn raw_file(harness: &Harness) -> String {
    std::fs::read_to_string(harness.store.file_path()).expect("read store file")
}

#[rstest]
#[actix_web::test]
async fn add_edit_delete_round_trip_through_the_file(harness: Harness) {
    let app = init_app!(harness);

    let added = test::call_service(
        &app,
        TestRequest::post()
            .uri("/contact")
            .set_form([
                ("name", "Alice"),
                ("email", "alice@example.com"),
                ("phone", "085712345678"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(added.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        raw_file(&harness),
        r#"[{"name":"Alice","email":"alice@example.com","phone":"085712345678"}]"#
    );

    let cookie = session_cookie(&added).expect("flash cookie");
    let list = test::call_service(
        &app,
        TestRequest::get().uri("/contact").cookie(cookie).to_request(),
    )
    .await;
    let body = body_text(list).await;
    assert!(body.contains("Contact added!"));
    assert!(body.contains("href=\"/contact/Alice\""));

    let updated = test::call_service(
        &app,
        TestRequest::post()
            .uri("/contact/update")
            .set_form([
                ("name", "Alice Wong"),
                ("email", "alice@example.com"),
                ("phone", "+6285712345678"),
                ("oldName", "Alice"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        harness.store.load_all().await.expect("load"),
        vec![Contact::new("Alice Wong", "alice@example.com", "+6285712345678")]
    );

    let detail = test::call_service(
        &app,
        TestRequest::get().uri("/contact/alice%20wong").to_request(),
    )
    .await;
    let body = body_text(detail).await;
    assert!(body.contains("+6285712345678"));
    assert!(body.contains("href=\"/contact/delete/Alice%20Wong\""));

    let deleted = test::call_service(
        &app,
        TestRequest::get()
            .uri("/contact/delete/Alice%20Wong")
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert_eq!(raw_file(&harness), "[]");
}

#[rstest]
#[actix_web::test]
async fn rejected_submission_leaves_the_file_untouched(harness: Harness) {
    std::fs::write(
        harness.store.file_path(),
        r#"[{"name":"Budi","email":"budi@x.com","phone":"081234567890"}]"#,
    )
    .expect("seed store");
    let before = raw_file(&harness);
    let app = init_app!(harness);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/contact")
            .set_form([
                ("name", "Budi"),
                ("email", "budi@x.com"),
                ("phone", "081234567890"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(raw_file(&harness), before);
}

#[rstest]
#[actix_web::test]
async fn corrupt_store_renders_redacted_500_with_trace_id(harness: Harness) {
    std::fs::write(harness.store.file_path(), "{oops").expect("corrupt store");
    let app = init_app!(harness);

    let res = test::call_service(&app, TestRequest::get().uri("/contact").to_request()).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = body_text(res).await;
    assert!(body.contains("Internal server error"));
    assert!(body.contains(&trace_id));
    assert!(!body.contains("oops"));
}

#[rstest]
#[actix_web::test]
async fn pages_are_html(harness: Harness) {
    let app = init_app!(harness);

    for uri in ["/", "/about", "/contact", "/contact/add"] {
        let res = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(
            content_type.as_deref(),
            Some("text/html; charset=utf-8"),
            "{uri}"
        );
    }
}
