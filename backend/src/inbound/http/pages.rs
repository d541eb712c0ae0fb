//! Static pages and the fallback for unknown routes.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

use super::views;

/// Landing page.
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::home_page())
}

/// About page.
#[get("/about")]
pub async fn about() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::about_page())
}

/// Fallback for any unmatched method or path.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(views::not_found_page())
}
