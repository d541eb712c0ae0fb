//! Contact pages and form handlers.
//!
//! ```text
//! GET  /contact               list with pending flash messages
//! GET  /contact/add           empty add form
//! POST /contact               create, 303 to /contact or 400 with the form
//! GET  /contact/edit/{name}   edit form pre-filled from the stored contact
//! POST /contact/update        update, 303 to /contact or 400 with the form
//! GET  /contact/delete/{name} delete, 303 to /contact or 404
//! GET  /contact/{name}        detail card
//! ```
//!
//! `/contact/add` must be registered before `/contact/{name}` so "add" is
//! never read as a contact name.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;

use super::error::HandlerResult;
use super::flash::{CONTACT_ADDED, CONTACT_DELETED, CONTACT_UPDATED, FlashMessages};
use super::state::HttpState;
use super::views::{self, FormMode};
use crate::domain::{ContactForm, DeletionOutcome, Error, SubmissionOutcome};

const CONTACT_LIST_PATH: &str = "/contact";

/// Urlencoded contact form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFormRequest {
    /// Submitted name.
    pub name: String,
    /// Submitted email address.
    pub email: String,
    /// Submitted phone number.
    pub phone: String,
    /// Name of the contact being edited; only sent by the edit form.
    #[serde(rename = "oldName")]
    pub old_name: Option<String>,
}

impl From<ContactFormRequest> for ContactForm {
    fn from(value: ContactFormRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            old_name: value.old_name,
        }
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, CONTACT_LIST_PATH))
        .finish()
}

fn respond_to_submission(
    outcome: SubmissionOutcome,
    mode: FormMode,
    form: &ContactForm,
    flash: &FlashMessages,
    saved_message: &str,
) -> HandlerResult<HttpResponse> {
    match outcome {
        SubmissionOutcome::Saved => {
            flash.push(saved_message)?;
            Ok(redirect_to_list())
        }
        SubmissionOutcome::Rejected(report) => {
            debug!(errors = report.errors().len(), "contact form rejected");
            Ok(html(
                StatusCode::BAD_REQUEST,
                views::contact_form_page(mode, form, report.errors()),
            ))
        }
    }
}

/// Contact list.
#[get("/contact")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    flash: FlashMessages,
) -> HandlerResult<HttpResponse> {
    let contacts = state.contacts.list().await?;
    let messages = flash.take()?;
    Ok(html(StatusCode::OK, views::contact_list_page(&contacts, &messages)))
}

/// Empty add form.
#[get("/contact/add")]
pub async fn add_contact_form() -> HttpResponse {
    html(
        StatusCode::OK,
        views::contact_form_page(FormMode::Add, &ContactForm::default(), &[]),
    )
}

/// Create a contact from the add form.
#[post("/contact")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    payload: web::Form<ContactFormRequest>,
) -> HandlerResult<HttpResponse> {
    let form = ContactForm::from(payload.into_inner());
    let outcome = state.contacts.create(form.clone()).await?;
    respond_to_submission(outcome, FormMode::Add, &form, &flash, CONTACT_ADDED)
}

/// Edit form pre-filled from the contact matching `name` ignoring case.
///
/// An unknown name renders empty fields.
#[get("/contact/edit/{name}")]
pub async fn edit_contact_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HandlerResult<HttpResponse> {
    let name = path.into_inner();
    let contact = state.contacts.find(&name).await?.unwrap_or_default();
    let form = ContactForm {
        old_name: Some(contact.name.clone()),
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
    };
    Ok(html(
        StatusCode::OK,
        views::contact_form_page(FormMode::Edit, &form, &[]),
    ))
}

/// Replace the contact named by `oldName` with the submitted fields.
#[post("/contact/update")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    payload: web::Form<ContactFormRequest>,
) -> HandlerResult<HttpResponse> {
    let form: ContactForm = payload.into_inner().into();
    let outcome = state.contacts.update(form.clone()).await?;
    respond_to_submission(outcome, FormMode::Edit, &form, &flash, CONTACT_UPDATED)
}

/// Delete the contact named `name`.
///
/// Responds 404 when no contact matches ignoring case.
#[get("/contact/delete/{name}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    path: web::Path<String>,
) -> HandlerResult<HttpResponse> {
    let name = path.into_inner();
    match state.contacts.delete(&name).await? {
        DeletionOutcome::NotFound => Err(Error::not_found(format!("Contact {name} not found"))),
        DeletionOutcome::Deleted { .. } => {
            flash.push(CONTACT_DELETED)?;
            Ok(redirect_to_list())
        }
    }
}

/// Detail card for the contact matching `name` ignoring case.
#[get("/contact/{name}")]
pub async fn contact_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HandlerResult<HttpResponse> {
    let contact = state.contacts.find(&path).await?.unwrap_or_default();
    Ok(html(StatusCode::OK, views::contact_detail_page(&contact)))
}
