//! Key-value cache
//!
//! The shortener keeps its records here rather than in SQLite. Entries
//! carry their own expiry; expired entries read as absent and are swept
//! periodically.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use thiserror::Error;
use tokio::time::Instant;

use crate::error::ServiceError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
}

impl From<CacheError> for ServiceError {
    fn from(e: CacheError) -> Self {
        ServiceError::Db(e.into())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// get / put-with-ttl / has over JSON values
#[async_trait]
pub trait KvCache: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Value>>;

    /// Insert or replace; the ttl restarts on every put
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> CacheResult<()>;

    async fn has(&self, key: &str) -> CacheResult<bool>;
}

pub type SharedCache = Arc<dyn KvCache>;

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// Single-process cache backed by a `DashMap`
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired entries, returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let live = entry.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        None
    }
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        Ok(self.live(key))
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn has(&self, key: &str) -> CacheResult<bool> {
        Ok(self.live(key).is_some())
    }
}
