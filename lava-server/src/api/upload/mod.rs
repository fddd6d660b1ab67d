//! Upload Routes
//!
//! Image upload for card photos and logos, and serving of stored images.
//! Returned URLs (`/api/image/{file}`) are valid `img_photo` / `img_logo`
//! values.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;
use shared::error::{AppError, ErrorCode};

use crate::core::ServerState;

pub use handler::UploadResponse;

/// Stored file response
enum UploadFileResponse {
    Ok(Bytes, String),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok(content, mime) => (
                http::StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime),
                    (
                        header::CACHE_CONTROL,
                        "public, max-age=31536000, immutable".to_string(),
                    ),
                ],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => AppError::new(ErrorCode::ImageNotFound).into_response(),
            UploadFileResponse::BadRequest(msg) => AppError::invalid_request(msg).into_response(),
        }
    }
}

/// Path traversal guard for stored file names
pub(crate) fn is_safe_filename(filename: &str) -> bool {
    !(filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\'))
}

/// GET /api/image/{filename}
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    if !is_safe_filename(&filename) {
        return UploadFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.images_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(&file_path)
                .first_or_octet_stream()
                .to_string();
            UploadFileResponse::Ok(content.into(), mime)
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "uploaded file not found");
            UploadFileResponse::NotFound
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/image/upload", post(handler::upload))
        .route("/api/image/{filename}", get(serve_uploaded_file))
}
