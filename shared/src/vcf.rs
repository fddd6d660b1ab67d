//! vCard 3.0 export
//!
//! Builds the `.vcf` text for a [`ContactData`]. Lines end with CRLF and
//! text values are escaped per RFC 2426 section 4. URI values are written
//! as-is apart from line breaks.

use crate::models::{ContactData, ContactField};

/// Export options that do not live on the contact itself
#[derive(Debug, Clone, Default)]
pub struct VcfOptions<'a> {
    /// Display text of the selected suffix ("Jr.", "III", ...)
    pub suffix: Option<&'a str>,
    /// Prefix for relative image URLs such as `/api/image/{file}`
    pub base_url: Option<&'a str>,
}

/// Escape a text value
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// A URI value; only line breaks are dropped
fn uri(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

fn absolute_uri(value: &str, base_url: Option<&str>) -> Option<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(uri(value));
    }
    if value.starts_with('/') {
        return base_url.map(|base| uri(&format!("{}{}", base.trim_end_matches('/'), value)));
    }
    // data: URIs and anything else are not portable as vCard URIs
    None
}

/// Render the contact as vCard 3.0 text
pub fn to_vcf(contact: &ContactData, options: &VcfOptions<'_>) -> String {
    let mut lines: Vec<String> = vec!["BEGIN:VCARD".into(), "VERSION:3.0".into()];
    let field = |f: ContactField| contact.get(f).map(escape).unwrap_or_default();

    lines.push(format!(
        "N:{};{};{};;{}",
        field(ContactField::LastName),
        field(ContactField::FirstName),
        field(ContactField::MiddleName),
        options.suffix.map(escape).unwrap_or_default(),
    ));

    let mut full_name = contact.full_name();
    if let Some(suffix) = options.suffix
        && !full_name.is_empty()
    {
        full_name = format!("{full_name} {suffix}");
    }
    if full_name.is_empty() {
        full_name = contact
            .get(ContactField::Organization)
            .unwrap_or("Unnamed")
            .to_string();
    }
    lines.push(format!("FN:{}", escape(&full_name)));

    if let Some(org) = contact.get(ContactField::Organization) {
        lines.push(format!("ORG:{}", escape(org)));
    }
    if let Some(title) = contact.get(ContactField::Title) {
        lines.push(format!("TITLE:{}", escape(title)));
    }
    if let Some(role) = contact.get(ContactField::Role) {
        lines.push(format!("ROLE:{}", escape(role)));
    }
    if let Some(phone) = contact.get(ContactField::Phone) {
        lines.push(format!("TEL;TYPE=CELL,VOICE:{}", escape(phone)));
    }
    if let Some(email) = contact.get(ContactField::Email) {
        lines.push(format!("EMAIL;TYPE=INTERNET,HOME:{}", escape(email)));
    }
    if let Some(email) = contact.distinct_work_email() {
        lines.push(format!("EMAIL;TYPE=INTERNET,WORK:{}", escape(email)));
    }
    if let Some(url) = contact.get(ContactField::Website) {
        lines.push(format!("URL;TYPE=WORK:{}", uri(url)));
    }
    if contact.has_work_address() {
        lines.push(format!(
            "ADR;TYPE=WORK:;;{};{};{};{};{}",
            field(ContactField::Street),
            field(ContactField::City),
            field(ContactField::State),
            field(ContactField::PostalCode),
            field(ContactField::Country),
        ));
    }
    for (label, url) in contact.social_links() {
        if label == "custom" {
            lines.push(format!("URL:{}", uri(url)));
        } else {
            lines.push(format!("X-SOCIALPROFILE;TYPE={label}:{}", uri(url)));
        }
    }
    if let Some(uri) = contact
        .get(ContactField::Photo)
        .and_then(|p| absolute_uri(p, options.base_url))
    {
        lines.push(format!("PHOTO;VALUE=URI:{uri}"));
    }
    if let Some(uri) = contact
        .get(ContactField::Logo)
        .and_then(|p| absolute_uri(p, options.base_url))
    {
        lines.push(format!("LOGO;VALUE=URI:{uri}"));
    }

    lines.push("END:VCARD".into());
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}
