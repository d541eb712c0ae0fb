//! Contact form validation.
//!
//! Validation is a pure function over the submitted form and the result of
//! the duplicate check. It never touches storage and never fails; callers get
//! a [`ValidationReport`] listing every field problem in form order.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::{Contact, ContactUpdate};

/// Message shown when the submitted name is already taken.
pub const DUPLICATE_NAME_MESSAGE: &str = "Contact name is already registered!";
/// Message shown when the submitted name is blank.
pub const EMPTY_NAME_MESSAGE: &str = "Contact name must not be empty.";
/// Message shown when the email address is malformed.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address!";
/// Message shown when the phone number is not an Indonesian mobile number.
pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone number!";

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\u{A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}-]+",
            r"(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\u{A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}-]+)*",
            r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Indonesian mobile prefixes: +62 / 62 / 0, then an 8xx operator code.
        let pattern = r"^(\+?62|0)8(1[1-9]|2[1238]|3[1238]|5[1235-9]|7[78]|9[5-9]|8[1-9])(?-u:[\s\d]){5,11}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Whether `value` is a syntactically valid email address.
///
/// The local part may contain non-ASCII letters and is limited to 64 bytes;
/// the domain must be ASCII.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _domain)) = value.rsplit_once('@') else {
        return false;
    };
    value.len() <= EMAIL_MAX_LEN
        && local.len() <= EMAIL_LOCAL_MAX_LEN
        && email_regex().is_match(value)
}

/// Whether `value` is a valid Indonesian mobile phone number.
///
/// Only ASCII digits and whitespace count.
#[must_use]
pub fn is_indonesian_mobile(value: &str) -> bool {
    phone_regex().is_match(value)
}

/// Form fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    /// The contact name.
    Name,
    /// The email address.
    Email,
    /// The phone number.
    Phone,
}

impl ContactField {
    /// Form field identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field and the message explaining why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: ContactField,
    message: String,
}

impl FieldError {
    fn new(field: ContactField, message: &str) -> Self {
        Self {
            field,
            message: message.to_owned(),
        }
    }

    /// Field the message refers to.
    #[must_use]
    pub fn field(&self) -> ContactField {
        self.field
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered collection of field errors; empty when the form is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Whether no field was rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rejected fields in form order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether `field` has at least one error.
    #[must_use]
    pub fn has_error_for(&self, field: ContactField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    fn push(&mut self, field: ContactField, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }
}

/// Raw contact form as submitted by a user.
///
/// `old_name` is present only when editing an existing contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Submitted name.
    pub name: String,
    /// Submitted email address.
    pub email: String,
    /// Submitted phone number.
    pub phone: String,
    /// Name of the contact being edited.
    pub old_name: Option<String>,
}

impl ContactForm {
    /// Split the form into the record to add.
    #[must_use]
    pub fn into_contact(self) -> Contact {
        Contact::new(self.name, self.email, self.phone)
    }

    /// Split an edit form into an update, or `None` when `old_name` is absent.
    #[must_use]
    pub fn into_update(self) -> Option<ContactUpdate> {
        let Self {
            name,
            email,
            phone,
            old_name,
        } = self;
        old_name.map(|old| ContactUpdate::new(old, Contact::new(name, email, phone)))
    }
}

/// Validate a submitted contact form.
///
/// `duplicate` is the result of the exact-name duplicate check for
/// `form.name`. A duplicate only counts when the name differs from
/// `form.old_name`, so an edit may keep its own name.
///
/// # Examples
/// ```
/// use contact_book::domain::{ContactField, ContactForm, validate_contact_form};
///
/// let form = ContactForm {
///     name: "Budi".into(),
///     email: "not-an-email".into(),
///     phone: "081234567890".into(),
///     old_name: None,
/// };
/// let report = validate_contact_form(&form, None);
/// assert!(report.has_error_for(ContactField::Email));
/// assert!(!report.has_error_for(ContactField::Phone));
/// ```
#[must_use]
pub fn validate_contact_form(form: &ContactForm, duplicate: Option<&Contact>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if form.name.trim().is_empty() {
        report.push(ContactField::Name, EMPTY_NAME_MESSAGE);
    } else if duplicate.is_some() && form.old_name.as_deref() != Some(form.name.as_str()) {
        report.push(ContactField::Name, DUPLICATE_NAME_MESSAGE);
    }

    if !is_valid_email(&form.email) {
        report.push(ContactField::Email, INVALID_EMAIL_MESSAGE);
    }

    if !is_indonesian_mobile(&form.phone) {
        report.push(ContactField::Phone, INVALID_PHONE_MESSAGE);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Budi".into(),
            email: "budi@example.com".into(),
            phone: "081234567890".into(),
            old_name: None,
        }
    }

    #[rstest]
    #[case("budi@example.com", true)]
    #[case("first.last+tag@mail.example.co.id", true)]
    #[case("budi@example", false)]
    #[case("budi.example.com", false)]
    #[case("budi@@example.com", false)]
    #[case("bu di@example.com", false)]
    #[case(".budi@example.com", false)]
    #[case("budi..x@example.com", false)]
    #[case("budi@-example.com", false)]
    #[case("büdi@example.com", true)]
    #[case("budi@exämple.com", false)]
    #[case("", false)]
    fn email_syntax(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(value), expected, "{value}");
    }

    #[rstest]
    #[case("081234567890", true)]
    #[case("+6281234567890", true)]
    #[case("6285712345678", true)]
    #[case("0812 3456 789", true)]
    #[case("0812345", false)]
    #[case("0212345678", false)]
    #[case("080123456789", false)]
    #[case("+1-555-1234", false)]
    #[case("08123456789012345", false)]
    #[case("0812\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}", false)]
    #[case("0812\u{3000}345678", false)]
    #[case("", false)]
    fn indonesian_mobile_numbers(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_indonesian_mobile(value), expected, "{value}");
    }

    #[rstest]
    #[case(64, true)]
    #[case(65, false)]
    fn email_local_part_is_limited_to_64_bytes(#[case] len: usize, #[case] expected: bool) {
        let address = format!("{}@example.com", "a".repeat(len));
        assert_eq!(is_valid_email(&address), expected);
    }

    #[rstest]
    fn email_local_part_limit_counts_bytes() {
        let address = format!("{}@example.com", "ü".repeat(33));
        assert!(!is_valid_email(&address));
    }

    #[rstest]
    fn accepts_valid_form(valid_form: ContactForm) {
        assert!(validate_contact_form(&valid_form, None).is_valid());
    }

    #[rstest]
    fn rejects_duplicate_on_add(valid_form: ContactForm) {
        let existing = valid_form.clone().into_contact();
        let report = validate_contact_form(&valid_form, Some(&existing));
        assert_eq!(report.errors().len(), 1);
        let error = report.errors().first().expect("one error");
        assert_eq!(error.field(), ContactField::Name);
        assert_eq!(error.message(), DUPLICATE_NAME_MESSAGE);
    }

    #[rstest]
    fn edit_may_keep_its_own_name(mut valid_form: ContactForm) {
        valid_form.old_name = Some("Budi".into());
        let existing = valid_form.clone().into_contact();
        assert!(validate_contact_form(&valid_form, Some(&existing)).is_valid());
    }

    #[rstest]
    fn edit_may_not_take_another_contacts_name(mut valid_form: ContactForm) {
        valid_form.old_name = Some("Andi".into());
        let existing = valid_form.clone().into_contact();
        let report = validate_contact_form(&valid_form, Some(&existing));
        assert!(report.has_error_for(ContactField::Name));
    }

    #[rstest]
    fn blank_name_is_rejected_without_duplicate_message(mut valid_form: ContactForm) {
        valid_form.name = "  ".into();
        let report = validate_contact_form(&valid_form, None);
        let messages: Vec<&str> = report.errors().iter().map(FieldError::message).collect();
        assert_eq!(messages, vec![EMPTY_NAME_MESSAGE]);
    }

    #[rstest]
    fn reports_every_invalid_field_in_form_order(mut valid_form: ContactForm) {
        valid_form.email = "nope".into();
        valid_form.phone = "12345".into();
        let existing = valid_form.clone().into_contact();
        let report = validate_contact_form(&valid_form, Some(&existing));
        let fields: Vec<ContactField> = report.errors().iter().map(FieldError::field).collect();
        assert_eq!(
            fields,
            vec![ContactField::Name, ContactField::Email, ContactField::Phone]
        );
    }

    #[rstest]
    fn into_update_strips_old_name(mut valid_form: ContactForm) {
        valid_form.old_name = Some("Andi".into());
        let update = valid_form.into_update().expect("edit form carries old name");
        assert_eq!(update.old_name, "Andi");
        assert_eq!(update.contact, Contact::new("Budi", "budi@example.com", "081234567890"));
    }

    #[rstest]
    fn into_update_requires_old_name(valid_form: ContactForm) {
        assert!(valid_form.into_update().is_none());
    }
}
