use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden from the environment (a `.env` file is
/// loaded first when present):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | DATABASE_URL | sqlite:data/lava.db | SQLite database URL |
/// | WORK_DIR | data | root for uploaded images |
/// | PUBLIC_BASE_URL | http://localhost:8000 | prefix of generated short URLs |
/// | LOG_LEVEL | info | log level when `RUST_LOG` is unset |
/// | LOG_DIR | (unset) | enables daily rolling file logs |
/// | PREVIEW_DEBOUNCE_MS | 300 | live preview quiet period |
/// | IMAGE_FETCH_TIMEOUT_MS | 5000 | remote photo/logo fetch timeout |
/// | MAX_UPLOAD_BYTES | 10485760 | upload and image source size limit |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 PUBLIC_BASE_URL=https://lava.example cargo run -p lava-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Running environment: development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub database_url: String,
    /// Uploaded images live under `{work_dir}/images`
    pub work_dir: String,
    /// Scheme and host used to build `short_url`
    pub public_base_url: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub preview_debounce_ms: u64,
    pub image_fetch_timeout_ms: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            http_port,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/lava.db".into()),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "data".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            preview_debounce_ms: std::env::var("PREVIEW_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            image_fetch_timeout_ms: std::env::var("IMAGE_FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }

    /// Override storage locations, mostly for tests
    pub fn with_overrides(
        work_dir: impl Into<String>,
        database_url: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = database_url.into();
        config.public_base_url = public_base_url.into();
        config
    }

    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("images")
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }

    pub fn image_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.image_fetch_timeout_ms)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides("/tmp/lava", "sqlite::memory:", "https://lava.example/");
        assert_eq!(config.images_dir(), PathBuf::from("/tmp/lava/images"));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.base_url(), "https://lava.example");
    }

    #[test]
    fn test_durations() {
        let mut config = Config::with_overrides("data", "sqlite::memory:", "http://localhost");
        config.preview_debounce_ms = 300;
        config.image_fetch_timeout_ms = 5000;
        assert_eq!(config.preview_debounce(), Duration::from_millis(300));
        assert_eq!(config.image_fetch_timeout(), Duration::from_secs(5));
    }
}
