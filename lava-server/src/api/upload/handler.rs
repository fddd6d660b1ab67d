//! Image Upload Handler
//!
//! Accepts PNG, JPEG and WebP and stores everything as JPEG. Files are
//! named by the SHA-256 of the stored bytes, so uploading the same image
//! twice yields the same URL.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};
use std::io::Cursor;
use std::path::Path;

use crate::core::ServerState;
use crate::error::ServiceResult;

/// Accepted upload extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality of stored images
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Content hash, also the file stem
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: String,
    /// Value to put into `img_photo` / `img_logo`
    pub url: String,
}

fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Size and extension checks, before any decoding
fn validate_upload(data: &[u8], ext: &str, max_bytes: usize) -> Result<(), AppError> {
    if data.len() > max_bytes {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                max_bytes,
                max_bytes / 1024 / 1024
            ),
        ));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext_lower,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    Ok(())
}

/// Decode and re-encode as JPEG
fn process_and_compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image file: {e}"))
    })?;

    let mut buffer = Vec::new();
    let rgb_img = img.to_rgb8();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    rgb_img
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;

    Ok(buffer)
}

/// POST /api/image/upload - multipart field `file`
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> ServiceResult<Json<UploadResponse>> {
    let images_dir = state.images_dir();
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| AppError::storage(format!("Failed to create images directory: {e}")))?;

    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Invalid multipart request: {e}")))?
    {
        if f.name() == Some("file") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::NoFileProvided,
            "No 'file' field found. Field name must be 'file'",
        )
    })?;

    let filename = original_filename.ok_or_else(|| {
        AppError::with_message(ErrorCode::NoFilename, "No filename provided in file field")
    })?;

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile).into());
    }

    let ext = Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidFileExtension,
                format!("Invalid file extension for: {filename}"),
            )
        })?;

    validate_upload(&data, &ext, state.config.max_upload_bytes)?;

    let compressed = tokio::task::spawn_blocking(move || process_and_compress_image(&data))
        .await
        .map_err(|e| AppError::internal(format!("Image processing task failed: {e}")))??;

    let file_id = calculate_hash(&compressed);
    let stored_name = format!("{file_id}.jpg");
    let file_path = images_dir.join(&stored_name);

    if tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
        tracing::info!(
            original_name = %filename,
            existing_file = %stored_name,
            "Duplicate image detected, returning existing file"
        );
    } else {
        tokio::fs::write(&file_path, &compressed)
            .await
            .map_err(|e| AppError::storage(format!("Failed to save file: {e}")))?;
        tracing::info!(
            original_name = %filename,
            size = %compressed.len(),
            hash = %file_id,
            "Image uploaded successfully"
        );
    }

    Ok(Json(UploadResponse {
        url: format!("{}{stored_name}", card_render::UPLOAD_URL_PREFIX),
        file_id,
        filename: stored_name,
        original_name: filename,
        size: compressed.len(),
        format: "jpg".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = calculate_hash(b"lava");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, calculate_hash(b"lava"));
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(b"x", "PNG", 10).is_ok());
        assert_eq!(
            validate_upload(b"x", "gif", 10).unwrap_err().code,
            ErrorCode::UnsupportedFileFormat
        );
        assert_eq!(
            validate_upload(&[0u8; 11], "png", 10).unwrap_err().code,
            ErrorCode::FileTooLarge
        );
    }

    #[test]
    fn test_process_outputs_jpeg() {
        let out = process_and_compress_image(&png_bytes()).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_process_rejects_garbage() {
        let err = process_and_compress_image(b"not an image").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }
}
