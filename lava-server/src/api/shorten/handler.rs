//! Shortener API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use http::{HeaderValue, StatusCode, header};
use shared::error::{AppError, ErrorCode};
use shared::models::{ShortUrlRecord, ShortenRequest};

use crate::core::ServerState;
use crate::error::ServiceResult;
use crate::utils::validation::validate_shorten;

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::ShortUrlNotFound, "Short URL not found")
}

/// POST /api/shorten - `{ "url": "https://..." }`
pub async fn shorten(
    State(state): State<ServerState>,
    Json(req): Json<ShortenRequest>,
) -> ServiceResult<Json<ShortUrlRecord>> {
    let url = validate_shorten(&req)?;
    let record = state.shortener.shorten(url).await?;
    Ok(Json(record))
}

/// GET /api/shorten/{code}
pub async fn stats(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> ServiceResult<Json<ShortUrlRecord>> {
    let record = state.shortener.stats(&code).await?.ok_or_else(not_found)?;
    Ok(Json(record))
}

/// GET /s/{code} - 302 Found
pub async fn redirect(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> ServiceResult<Response> {
    let record = state.shortener.resolve(&code).await?.ok_or_else(not_found)?;
    let location = HeaderValue::from_str(&record.original_url)
        .map_err(|e| AppError::internal(format!("Stored URL is not a valid header: {e}")))?;
    tracing::debug!(code = %code, clicks = record.clicks, "Short URL followed");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
