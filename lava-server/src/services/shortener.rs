//! URL shortener
//!
//! Records live in the key-value cache under `url:{code}` with a one-year
//! expiry that restarts on every write. Each redirect bumps `clicks` with a
//! read-then-write; concurrent redirects of the same code may lose counts.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use shared::error::{AppError, ErrorCode};
use shared::models::ShortUrlRecord;

use crate::cache::SharedCache;
use crate::error::{ServiceError, ServiceResult};

/// Length of generated short codes
pub const CODE_LEN: usize = 6;

/// Record lifetime, refreshed on every write
pub const RECORD_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Attempts before giving up on finding a free code
const MAX_CODE_ATTEMPTS: usize = 32;

type CodeSource = Arc<dyn Fn() -> String + Send + Sync>;

fn random_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(char::from)
        .collect()
}

fn cache_key(code: &str) -> String {
    format!("url:{code}")
}

#[derive(Clone)]
pub struct Shortener {
    cache: SharedCache,
    base_url: String,
    codes: CodeSource,
}

impl std::fmt::Debug for Shortener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shortener")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Shortener {
    pub fn new(cache: SharedCache, base_url: impl Into<String>) -> Self {
        Self {
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            codes: Arc::new(random_code),
        }
    }

    /// Replace the code generator (deterministic codes in tests)
    pub fn with_code_source(mut self, codes: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.codes = Arc::new(codes);
        self
    }

    /// Draw codes until one is not a live cache key
    async fn free_code(&self) -> ServiceResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = (self.codes)();
            if !self.cache.has(&cache_key(&code)).await? {
                return Ok(code);
            }
            tracing::debug!(code = %code, "short code taken, retrying");
        }
        tracing::error!(attempts = MAX_CODE_ATTEMPTS, "no free short code found");
        Err(AppError::new(ErrorCode::ShortCodeExhausted).into())
    }

    async fn store(&self, record: &ShortUrlRecord) -> ServiceResult<()> {
        let value = serde_json::to_value(record).map_err(|e| ServiceError::Db(e.into()))?;
        self.cache
            .put(&cache_key(&record.short_code), value, RECORD_TTL)
            .await?;
        Ok(())
    }

    async fn load(&self, code: &str) -> ServiceResult<Option<ShortUrlRecord>> {
        let Some(value) = self.cache.get(&cache_key(code)).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "corrupt short url record ignored");
                Ok(None)
            }
        }
    }

    /// Create a record for an already validated URL
    pub async fn shorten(&self, original_url: impl Into<String>) -> ServiceResult<ShortUrlRecord> {
        let code = self.free_code().await?;
        let created_at = Utc::now();
        let record = ShortUrlRecord {
            id: created_at.timestamp(),
            original_url: original_url.into(),
            short_url: format!("{}/s/{}", self.base_url, code),
            short_code: code,
            clicks: 0,
            created_at,
        };
        self.store(&record).await?;
        tracing::info!(code = %record.short_code, url = %record.original_url, "Short URL created");
        Ok(record)
    }

    /// Count a click and return the updated record
    pub async fn resolve(&self, code: &str) -> ServiceResult<Option<ShortUrlRecord>> {
        let Some(mut record) = self.load(code).await? else {
            return Ok(None);
        };
        record.clicks += 1;
        self.store(&record).await?;
        Ok(Some(record))
    }

    /// Look up a record without counting a click
    pub async fn stats(&self, code: &str) -> ServiceResult<Option<ShortUrlRecord>> {
        self.load(code).await
    }
}
