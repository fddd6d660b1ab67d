//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Card errors
//! - 2xxx: Upload errors
//! - 3xxx: Short link errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can
/// match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Card ====================
    /// Stored card not found
    ContactNotFound = 1001,
    /// Suffix id does not exist
    SuffixNotFound = 1002,
    /// Card could not be rendered
    RenderFailed = 1003,
    /// Rendered card could not be encoded
    ExportFailed = 1004,
    /// Unknown render mode
    InvalidRenderMode = 1005,

    // ==================== 2xxx: Upload ====================
    /// File exceeds the size limit
    FileTooLarge = 2001,
    /// File format is not accepted
    UnsupportedFileFormat = 2002,
    /// File content is not a decodable image
    InvalidImageFile = 2003,
    /// No file field in the multipart body
    NoFileProvided = 2004,
    /// File field is empty
    EmptyFile = 2005,
    /// File field has no filename
    NoFilename = 2006,
    /// Filename has no usable extension
    InvalidFileExtension = 2007,
    /// Uploaded image not found
    ImageNotFound = 2008,

    // ==================== 3xxx: Short links ====================
    /// Short code not known
    ShortUrlNotFound = 3001,
    /// Target is not a valid URL
    InvalidUrl = 3002,
    /// No free short code could be generated
    ShortCodeExhausted = 3003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// File storage error
    StorageError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Card
            ErrorCode::ContactNotFound => "Card not found",
            ErrorCode::SuffixNotFound => "The selected suffix is invalid",
            ErrorCode::RenderFailed => "Card could not be rendered",
            ErrorCode::ExportFailed => "Card could not be exported",
            ErrorCode::InvalidRenderMode => "Unknown render mode",

            // Upload
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "File is empty",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::InvalidFileExtension => "Invalid file extension",
            ErrorCode::ImageNotFound => "Image not found",

            // Short links
            ErrorCode::ShortUrlNotFound => "Short URL not found",
            ErrorCode::InvalidUrl => "The url format is invalid",
            ErrorCode::ShortCodeExhausted => "Could not allocate a short code",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageError => "File storage error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Card
            1001 => Ok(ErrorCode::ContactNotFound),
            1002 => Ok(ErrorCode::SuffixNotFound),
            1003 => Ok(ErrorCode::RenderFailed),
            1004 => Ok(ErrorCode::ExportFailed),
            1005 => Ok(ErrorCode::InvalidRenderMode),

            // Upload
            2001 => Ok(ErrorCode::FileTooLarge),
            2002 => Ok(ErrorCode::UnsupportedFileFormat),
            2003 => Ok(ErrorCode::InvalidImageFile),
            2004 => Ok(ErrorCode::NoFileProvided),
            2005 => Ok(ErrorCode::EmptyFile),
            2006 => Ok(ErrorCode::NoFilename),
            2007 => Ok(ErrorCode::InvalidFileExtension),
            2008 => Ok(ErrorCode::ImageNotFound),

            // Short links
            3001 => Ok(ErrorCode::ShortUrlNotFound),
            3002 => Ok(ErrorCode::InvalidUrl),
            3003 => Ok(ErrorCode::ShortCodeExhausted),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9006 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
