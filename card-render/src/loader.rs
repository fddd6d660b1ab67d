//! Async image loading for the photo and logo slots

use std::path::PathBuf;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::LoadError;

/// URL prefix of images stored by the upload endpoint
pub const UPLOAD_URL_PREFIX: &str = "/api/image/";

/// Where a photo or logo comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw file bytes (any format `image` can sniff)
    Bytes(Vec<u8>),
    /// `data:` URI, stored upload URL, or remote http(s) URL
    Url(String),
}

impl ImageSource {
    /// Interpret a contact field value; blank means no image
    pub fn from_field(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self::Url(value.to_string()))
    }
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory holding uploaded images; `/api/image/{file}` resolves here
    pub images_dir: Option<PathBuf>,
    /// Remote fetch timeout
    pub timeout: Duration,
    /// Largest accepted encoded image
    pub max_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            images_dir: None,
            timeout: Duration::from_millis(5000),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Resolves [`ImageSource`]s into decoded RGBA bitmaps
#[derive(Debug, Clone)]
pub struct ImageLoader {
    http: reqwest::Client,
    config: LoaderConfig,
}

impl ImageLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("card-render/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and decode one image
    pub async fn load(&self, source: ImageSource) -> Result<RgbaImage, LoadError> {
        let bytes = match source {
            ImageSource::Bytes(bytes) => bytes,
            ImageSource::Url(url) => self.fetch(&url).await?,
        };
        if bytes.len() > self.config.max_bytes {
            return Err(LoadError::TooLarge(bytes.len()));
        }

        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes).map(|img| img.to_rgba8()))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?
            .map_err(LoadError::from)
    }

    /// Load an image, logging and swallowing any failure
    pub async fn load_or_absent(
        &self,
        slot: &'static str,
        source: Option<ImageSource>,
    ) -> Option<RgbaImage> {
        let source = source?;
        match self.load(source).await {
            Ok(img) => {
                debug!(slot, width = img.width(), height = img.height(), "image loaded");
                Some(img)
            }
            Err(e) => {
                warn!(slot, error = %e, "image load failed, slot left blank");
                None
            }
        }
    }

    /// Load photo and logo concurrently
    pub async fn load_pair(
        &self,
        photo: Option<ImageSource>,
        logo: Option<ImageSource>,
    ) -> (Option<RgbaImage>, Option<RgbaImage>) {
        tokio::join!(
            self.load_or_absent("photo", photo),
            self.load_or_absent("logo", logo)
        )
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        if let Some(rest) = url.strip_prefix("data:") {
            return decode_data_uri(rest);
        }
        if let Some(filename) = url.strip_prefix(UPLOAD_URL_PREFIX) {
            return self.read_upload(filename).await;
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            let response = self
                .http
                .get(url)
                .timeout(self.config.timeout)
                .send()
                .await?
                .error_for_status()?;
            return read_capped(response, self.config.max_bytes).await;
        }
        Err(LoadError::UnsupportedSource(url.chars().take(64).collect()))
    }

    async fn read_upload(&self, filename: &str) -> Result<Vec<u8>, LoadError> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(LoadError::UnsupportedSource(format!(
                "{UPLOAD_URL_PREFIX}{filename}"
            )));
        }
        let Some(dir) = &self.config.images_dir else {
            return Err(LoadError::UnsupportedSource(format!(
                "{UPLOAD_URL_PREFIX}{filename}"
            )));
        };
        Ok(tokio::fs::read(dir.join(filename)).await?)
    }
}

/// Read a response body, giving up once it passes `max_bytes`
async fn read_capped(mut response: reqwest::Response, max_bytes: usize) -> Result<Vec<u8>, LoadError> {
    if let Some(len) = response.content_length() {
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len > max_bytes {
            return Err(LoadError::TooLarge(len));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let len = body.len().saturating_add(chunk.len());
        if len > max_bytes {
            return Err(LoadError::TooLarge(len));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Decode the part of a `data:` URI after the scheme
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, LoadError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::InvalidDataUri("missing ','".into()))?;
    if !meta.ends_with(";base64") {
        return Err(LoadError::InvalidDataUri("only base64 payloads are supported".into()));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadError::InvalidDataUri(e.to_string()))
}
