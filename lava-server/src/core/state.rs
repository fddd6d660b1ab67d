use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use card_render::{CardRenderer, ImageLoader, LoaderConfig};
use sqlx::SqlitePool;

use crate::cache::MemoryCache;
use crate::core::Config;
use crate::db::DbService;
use crate::services::Shortener;
use crate::utils::AppError;

/// How often expired cache entries are swept
const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Shared server state, cheap to clone into every handler
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite pool (cards, suffixes) |
/// | renderer | card renderer with its image loader |
/// | cache | key-value cache behind the shortener |
/// | shortener | short link service |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub renderer: CardRenderer,
    pub cache: Arc<MemoryCache>,
    pub shortener: Shortener,
}

impl ServerState {
    /// Assemble state from an opened database
    pub fn new(config: Config, db: DbService) -> Result<Self, AppError> {
        let loader = ImageLoader::new(LoaderConfig {
            images_dir: Some(config.images_dir()),
            timeout: config.image_fetch_timeout(),
            max_bytes: config.max_upload_bytes,
        });
        let renderer = CardRenderer::new(loader)
            .map_err(|e| AppError::internal(format!("Failed to load fonts: {e}")))?;

        let cache = Arc::new(MemoryCache::new());
        let shortener = Shortener::new(cache.clone(), config.base_url());

        Ok(Self {
            config,
            pool: db.pool,
            renderer,
            cache,
            shortener,
        })
    }

    /// Create the work directory, open the database and build the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let images_dir = config.images_dir();
        std::fs::create_dir_all(&images_dir).map_err(|e| {
            AppError::storage(format!(
                "Failed to create images directory {}: {e}",
                images_dir.display()
            ))
        })?;

        let db = DbService::new(&config.database_url).await?;
        Self::new(config.clone(), db)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.config.images_dir()
    }

    /// Spawn periodic housekeeping
    pub fn start_background_tasks(&self) {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CACHE_SWEEP_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = cache.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, "expired cache entries swept");
                }
            }
        });
    }
}
