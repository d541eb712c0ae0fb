//! Server-rendered HTML pages.
//!
//! Every page shares one layout with the site navigation. Interpolated text
//! always goes through [`escape_html`]; contact names placed in links go
//! through [`contact_path`] so they are percent-encoded as a path segment.

use actix_web::http::StatusCode;
use serde_json::Value;
use url::Url;

use crate::domain::{Contact, ContactField, ContactForm, FieldError};

const PATH_BASE: &str = "http://localhost/";

/// Escape text for safe inclusion in HTML content and quoted attributes.
///
/// # Examples
/// ```
/// use contact_book::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom & Jerry\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Absolute path made of `prefix` segments followed by the contact `name`,
/// percent-encoded.
///
/// # Examples
/// ```
/// use contact_book::inbound::http::views::contact_path;
///
/// assert_eq!(contact_path(&["contact", "edit"], "Budi Santoso"), "/contact/edit/Budi%20Santoso");
/// ```
#[must_use]
pub fn contact_path(prefix: &[&str], name: &str) -> String {
    let Ok(mut url) = Url::parse(PATH_BASE) else {
        return format!("/{}/{}", prefix.join("/"), escape_html(name));
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.extend(prefix).push(name);
    }
    url.path().to_owned()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<nav><a href=\"/\">Home</a> | <a href=\"/about\">About</a> | ",
            "<a href=\"/contact\">Contact</a></nav>\n",
            "<main>\n{body}\n</main>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape_html(title),
        body = body,
    )
}

/// Landing page.
#[must_use]
pub fn home_page() -> String {
    layout(
        "Home",
        "<h1>Contact Book</h1>\n<p>Keep track of names, email addresses and phone numbers.</p>\n\
         <p><a href=\"/contact\">Open the contact list</a></p>",
    )
}

/// About page.
#[must_use]
pub fn about_page() -> String {
    layout(
        "About",
        "<h1>About</h1>\n<p>Contacts are stored in a single JSON file on the server.</p>",
    )
}

fn flash_block(messages: &[String]) -> String {
    messages
        .iter()
        .map(|message| format!("<div class=\"flash\" role=\"alert\">{}</div>\n", escape_html(message)))
        .collect()
}

/// Contact list with any pending flash messages.
#[must_use]
pub fn contact_list_page(contacts: &[Contact], flash: &[String]) -> String {
    let rows: String = if contacts.is_empty() {
        "<tr><td colspan=\"3\">No contacts yet.</td></tr>\n".to_owned()
    } else {
        contacts
            .iter()
            .enumerate()
            .map(|(index, contact)| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td><a href=\"{}\">Detail</a></td></tr>\n",
                    index + 1,
                    escape_html(&contact.name),
                    escape_html(&contact_path(&["contact"], &contact.name)),
                )
            })
            .collect()
    };
    let body = format!(
        concat!(
            "<h1>Contact List</h1>\n",
            "{flash}",
            "<p><a href=\"/contact/add\">Add contact</a></p>\n",
            "<table>\n<thead><tr><th>#</th><th>Name</th><th></th></tr></thead>\n",
            "<tbody>\n{rows}</tbody>\n</table>"
        ),
        flash = flash_block(flash),
        rows = rows,
    );
    layout("Contact", &body)
}

/// Detail card for one contact. An absent contact renders as empty fields.
#[must_use]
pub fn contact_detail_page(contact: &Contact) -> String {
    let body = format!(
        concat!(
            "<h1>Contact Detail</h1>\n",
            "<dl>\n",
            "<dt>Name</dt><dd>{name}</dd>\n",
            "<dt>Email</dt><dd>{email}</dd>\n",
            "<dt>Phone</dt><dd>{phone}</dd>\n",
            "</dl>\n",
            "<p><a href=\"{edit}\">Edit</a> | <a href=\"{delete}\" ",
            "onclick=\"return confirm('Delete this contact?');\">Delete</a> | ",
            "<a href=\"/contact\">Back to list</a></p>"
        ),
        name = escape_html(&contact.name),
        email = escape_html(&contact.email),
        phone = escape_html(&contact.phone),
        edit = escape_html(&contact_path(&["contact", "edit"], &contact.name)),
        delete = escape_html(&contact_path(&["contact", "delete"], &contact.name)),
    );
    layout("Detail", &body)
}

/// Which contact form to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New contact, posted to `/contact`.
    Add,
    /// Existing contact, posted to `/contact/update` with `oldName`.
    Edit,
}

impl FormMode {
    const fn title(self) -> &'static str {
        match self {
            Self::Add => "Add Contact",
            Self::Edit => "Edit Contact",
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::Add => "/contact",
            Self::Edit => "/contact/update",
        }
    }
}

fn error_block(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|error| {
            format!(
                "<li data-field=\"{}\">{}</li>\n",
                error.field(),
                escape_html(error.message())
            )
        })
        .collect();
    format!("<ul class=\"errors\" role=\"alert\">\n{items}</ul>\n")
}

fn input(field: ContactField, label: &str, kind: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{field}\">{label}</label> \
         <input type=\"{kind}\" id=\"{field}\" name=\"{field}\" value=\"{value}\" required></p>\n",
        value = escape_html(value),
    )
}

/// Add or edit form, pre-filled with `values` and listing `errors`.
#[must_use]
pub fn contact_form_page(mode: FormMode, values: &ContactForm, errors: &[FieldError]) -> String {
    let old_name = match mode {
        FormMode::Add => String::new(),
        FormMode::Edit => format!(
            "<input type=\"hidden\" name=\"oldName\" value=\"{}\">\n",
            escape_html(values.old_name.as_deref().unwrap_or_default())
        ),
    };
    let body = format!(
        concat!(
            "<h1>{title}</h1>\n",
            "{errors}",
            "<form method=\"post\" action=\"{action}\">\n",
            "{old_name}{name}{email}{phone}",
            "<p><button type=\"submit\">Save</button> <a href=\"/contact\">Cancel</a></p>\n",
            "</form>"
        ),
        title = mode.title(),
        errors = error_block(errors),
        action = mode.action(),
        old_name = old_name,
        name = input(ContactField::Name, "Name", "text", &values.name),
        email = input(ContactField::Email, "Email", "email", &values.email),
        phone = input(ContactField::Phone, "Phone", "tel", &values.phone),
    );
    layout(mode.title(), &body)
}

/// Plain 404 page for unknown routes.
#[must_use]
pub fn not_found_page() -> String {
    "<h1>Error 404</h1>".to_owned()
}

fn details_block(details: Option<&Value>) -> String {
    let Some(Value::Object(entries)) = details else {
        return details
            .map(|value| format!("<p class=\"details\">{}</p>\n", escape_html(&value.to_string())))
            .unwrap_or_default();
    };
    let items: String = entries
        .iter()
        .map(|(key, value)| {
            let text = value.as_str().map_or_else(|| value.to_string(), str::to_owned);
            format!("<dt>{}</dt><dd>{}</dd>\n", escape_html(key), escape_html(&text))
        })
        .collect();
    format!("<dl class=\"details\">\n{items}</dl>\n")
}

/// Error page for failed requests, listing any structured `details`.
#[must_use]
pub fn error_page(
    status: StatusCode,
    message: &str,
    trace_id: Option<&str>,
    details: Option<&Value>,
) -> String {
    let trace = trace_id
        .map(|id| format!("<p><small>Trace ID: {}</small></p>\n", escape_html(id)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Error {}</h1>\n<p>{}</p>\n{details}{trace}<p><a href=\"/contact\">Back to list</a></p>",
        status.as_u16(),
        escape_html(message),
        details = details_block(details),
    );
    layout(status.canonical_reason().unwrap_or("Error"), &body)
}
