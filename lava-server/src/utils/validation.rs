//! Input validation
//!
//! Rule sets are `validator` structs built from the request payload. Blank
//! strings are treated as absent before the rules run, so `required` also
//! rejects whitespace-only input. Failures become a 422 `AppError` whose
//! `details.fields` maps each wire field name to its messages.

use std::collections::BTreeMap;

use shared::models::{ContactData, ContactField, ShortenRequest};
use shared::util::non_blank;
use validator::{Validate, ValidationErrors};

use crate::utils::{AppError, ErrorCode};

// ── Length limits ───────────────────────────────────────────────────

/// Any stored card text field
pub const MAX_FIELD_LEN: u64 = 255;

/// Shortener targets
pub const MAX_URL_LEN: u64 = 2048;

// ── Rule sets ───────────────────────────────────────────────────────

/// Store rules for a card
#[derive(Debug, Validate)]
pub struct ContactRules {
    #[validate(required, length(max = MAX_FIELD_LEN))]
    pub vcard_fname: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub vcard_mname: Option<String>,
    #[validate(required, length(max = MAX_FIELD_LEN))]
    pub vcard_lname: Option<String>,

    #[validate(email, length(max = MAX_FIELD_LEN))]
    pub con_email: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub con_phone: Option<String>,

    #[validate(length(max = MAX_FIELD_LEN))]
    pub img_photo: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub img_logo: Option<String>,

    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_linkedin: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_twitter: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_facebook: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_instagram: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_youtube: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub soc_customlink: Option<String>,

    #[validate(length(max = MAX_FIELD_LEN))]
    pub wrk_org: Option<String>,
    #[validate(email, length(max = MAX_FIELD_LEN))]
    pub wkr_email: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wrk_title: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wrk_role: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wrk_url: Option<String>,

    #[validate(length(max = MAX_FIELD_LEN))]
    pub wa_street: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wa_city: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wa_state: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wa_postal_code: Option<String>,
    #[validate(length(max = MAX_FIELD_LEN))]
    pub wa_country: Option<String>,
}

impl From<&ContactData> for ContactRules {
    fn from(data: &ContactData) -> Self {
        let f = |field: ContactField| data.get(field).map(str::to_string);
        Self {
            vcard_fname: f(ContactField::FirstName),
            vcard_mname: f(ContactField::MiddleName),
            vcard_lname: f(ContactField::LastName),
            con_email: f(ContactField::Email),
            con_phone: f(ContactField::Phone),
            img_photo: f(ContactField::Photo),
            img_logo: f(ContactField::Logo),
            soc_linkedin: f(ContactField::Linkedin),
            soc_twitter: f(ContactField::Twitter),
            soc_facebook: f(ContactField::Facebook),
            soc_instagram: f(ContactField::Instagram),
            soc_youtube: f(ContactField::Youtube),
            soc_customlink: f(ContactField::CustomLink),
            wrk_org: f(ContactField::Organization),
            wkr_email: f(ContactField::WorkEmail),
            wrk_title: f(ContactField::Title),
            wrk_role: f(ContactField::Role),
            wrk_url: f(ContactField::Website),
            wa_street: f(ContactField::Street),
            wa_city: f(ContactField::City),
            wa_state: f(ContactField::State),
            wa_postal_code: f(ContactField::PostalCode),
            wa_country: f(ContactField::Country),
        }
    }
}

/// Shorten rules: `url` required, absolute URL, at most 2048 chars
#[derive(Debug, Validate)]
pub struct ShortenRules {
    #[validate(required, url, length(max = MAX_URL_LEN))]
    pub url: Option<String>,
}

impl From<&ShortenRequest> for ShortenRules {
    fn from(req: &ShortenRequest) -> Self {
        Self {
            url: non_blank(&req.url).map(|u| u.trim().to_string()),
        }
    }
}

// ── Entry points ────────────────────────────────────────────────────

/// Validate a card before it is stored
pub fn validate_contact(data: &ContactData) -> Result<(), AppError> {
    ContactRules::from(data)
        .validate()
        .map_err(|errors| validation_error(&errors))
}

/// Validate a shorten request; returns the trimmed target URL
pub fn validate_shorten(req: &ShortenRequest) -> Result<String, AppError> {
    let rules = ShortenRules::from(req);
    if let Err(errors) = rules.validate() {
        let mut err = validation_error(&errors);
        if has_code(&errors, "url") {
            err.code = ErrorCode::InvalidUrl;
        }
        return Err(err);
    }
    Ok(rules.url.unwrap_or_default())
}

/// Single-field validation error in the same shape as rule failures
pub fn field_error(code: ErrorCode, field: &str, message: impl Into<String>) -> AppError {
    let mut fields = BTreeMap::new();
    fields.insert(field.to_string(), vec![message.into()]);
    let mut err = AppError::invalid_fields(fields);
    err.code = code;
    err
}

// ── Message formatting ──────────────────────────────────────────────

/// Wire name of a rule field (`wrk_url` is sent as `wrk_URL`)
fn wire_name(field: &str) -> String {
    ContactField::ALL
        .iter()
        .map(|f| f.name())
        .find(|name| name.eq_ignore_ascii_case(field))
        .unwrap_or(field)
        .to_string()
}

fn message(label: &str, error: &validator::ValidationError) -> String {
    match &*error.code {
        "required" => format!("The {label} field is required."),
        "length" => match error.params.get("max") {
            Some(max) => {
                format!("The {label} field must not be greater than {max} characters.")
            }
            None => format!("The {label} field has an invalid length."),
        },
        "email" => format!("The {label} field must be a valid email address."),
        "url" => format!("The {label} field must be a valid URL."),
        _ => format!("The {label} field is invalid."),
    }
}

fn has_code(errors: &ValidationErrors, code: &str) -> bool {
    errors
        .field_errors()
        .values()
        .any(|errs| errs.iter().any(|e| e.code == code))
}

/// Convert rule failures into a 422 error with per-field messages
pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, errs) in errors.field_errors() {
        let name = wire_name(&field);
        let label = name.replace('_', " ");
        fields
            .entry(name)
            .or_default()
            .extend(errs.iter().map(|e| message(&label, e)));
    }
    AppError::invalid_fields(fields)
}
