//! Error types for the card renderer

use thiserror::Error;

/// Renderer error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// Bundled font data could not be parsed
    #[error("Invalid font data: {0}")]
    Font(&'static str),

    /// Surface could not be encoded to the export format
    #[error("Encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Render mode name not recognised
    #[error("Unknown render mode: {0}")]
    UnknownMode(String),

    /// Blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Task(String),
}

/// QR generation errors
///
/// Kept apart from "no URL": the renderer never calls the generator when
/// the website field is blank, so any of these means a real failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrError {
    /// Payload is empty
    #[error("QR payload is empty")]
    EmptyPayload,

    /// Encoder rejected the payload (e.g. too long for the EC level)
    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// Image loading errors
///
/// These never escape the renderer; a failed load means "no image".
#[derive(Debug, Error)]
pub enum LoadError {
    /// `data:` URI could not be parsed
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Source scheme is not supported
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),

    /// Remote fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Local read failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image exceeds the size limit
    #[error("Image too large: {0} bytes")]
    TooLarge(usize),

    /// Bytes are not a decodable image
    #[error("Decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// Decode task panicked or was cancelled
    #[error("Decode task failed: {0}")]
    Task(String),
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;
