//! Binary and attachment responses shared by the card routes

use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use shared::models::ContactData;

pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";
pub const VCARD: &str = "text/vcard; charset=utf-8";

/// Inline image (previews)
pub fn image_response(bytes: Vec<u8>, content_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        bytes,
    )
        .into_response()
}

/// Downloadable file with a `Content-Disposition` filename
pub fn attachment(body: impl Into<axum::body::Body>, content_type: &'static str, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        body.into(),
    )
        .into_response()
}

/// `<full name>.vcf`, or `contact.vcf` for a nameless card
pub fn vcf_filename(data: &ContactData) -> String {
    let name = data.full_name();
    if name.is_empty() {
        "contact.vcf".to_string()
    } else {
        format!("{name}.vcf")
    }
}

/// `attachment; filename="..."; filename*=UTF-8''...`
///
/// The plain `filename` keeps printable ASCII only; `filename*` carries
/// the exact UTF-8 name.
pub fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len() * 3);
    for b in filename.bytes() {
        if b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b) {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
