//! Short URL Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short link record as kept in the key-value cache under `url:{short_code}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrlRecord {
    /// Creation time in unix seconds
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    /// Absolute URL of the redirect endpoint (`{base}/s/{short_code}`)
    pub short_url: String,
    #[serde(default)]
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

/// Shorten request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: Option<String>,
}
