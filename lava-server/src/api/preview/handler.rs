//! Preview API Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use card_render::{CardRequest, RenderMode, download_filename};
use serde::Deserialize;
use shared::models::ContactData;

use crate::api::{files, vcards};
use crate::core::ServerState;
use crate::error::ServiceResult;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    /// Overrides `mode` of the body when present
    pub mode: Option<String>,
}

/// POST /api/vcard/preview?mode=inline|modal|download
pub async fn preview(
    State(state): State<ServerState>,
    Query(query): Query<PreviewQuery>,
    Json(mut request): Json<CardRequest>,
) -> ServiceResult<Response> {
    if let Some(mode) = query.mode.as_deref() {
        request.mode = mode.parse()?;
    }

    let bytes = state
        .renderer
        .render_png(&request.data, &request.customization, request.mode)
        .await?;
    Ok(files::image_response(bytes, files::PNG))
}

/// POST /api/vcard/download - always rendered at download resolution
pub async fn download(
    State(state): State<ServerState>,
    Json(request): Json<CardRequest>,
) -> ServiceResult<Response> {
    let bytes = state
        .renderer
        .render_jpeg(&request.data, &request.customization, RenderMode::Download)
        .await?;

    let filename = download_filename(&request.data);
    tracing::info!(filename = %filename, size = bytes.len(), "Card exported");
    Ok(files::attachment(bytes, files::JPEG, &filename))
}

/// POST /api/vcard/vcf
pub async fn vcf(
    State(state): State<ServerState>,
    Json(data): Json<ContactData>,
) -> ServiceResult<Response> {
    vcards::vcf_attachment(&state, &data).await
}
