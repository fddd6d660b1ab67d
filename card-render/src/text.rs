//! Text shaping helpers for card lines

use shared::models::{ContactData, ContactField};

/// Cut `text` to `budget` characters, ending in `...` when it overflows.
///
/// Counts chars, not bytes, so multi-byte names never split mid-codepoint.
pub fn truncate_with_ellipsis(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let keep = budget.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Display form of a URL: scheme dropped
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// `"{role} at {org}"`, or whichever half is present
pub fn role_line(data: &ContactData) -> Option<String> {
    let parts: Vec<&str> = [
        data.get(ContactField::Role),
        data.get(ContactField::Organization),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join(" at "))
}

/// `"street, city, state, postal, country"` with absent parts skipped
pub fn address_line(data: &ContactData) -> Option<String> {
    let locality: Vec<&str> = [data.get(ContactField::City), data.get(ContactField::State)]
        .into_iter()
        .flatten()
        .collect();
    let locality = (!locality.is_empty()).then(|| locality.join(", "));

    let parts: Vec<&str> = [
        data.get(ContactField::Street),
        locality.as_deref(),
        data.get(ContactField::PostalCode),
        data.get(ContactField::Country),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
