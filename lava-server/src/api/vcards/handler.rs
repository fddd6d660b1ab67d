//! vCard API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use card_render::{RenderMode, download_filename};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{ContactData, CustomizationCatalog, CustomizationState, VCardRecord};
use shared::vcf::{VcfOptions, to_vcf};

use crate::api::files;
use crate::core::ServerState;
use crate::db::repository::vcard;
use crate::error::ServiceResult;
use crate::utils::validation::validate_contact;

/// Render options for a stored card; ids refer to the customization catalog
#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub mode: Option<String>,
    pub background: Option<String>,
    pub qr_pattern: Option<String>,
}

impl CardQuery {
    fn mode(&self) -> ServiceResult<RenderMode> {
        match self.mode.as_deref() {
            Some(mode) => Ok(mode.parse()?),
            None => Ok(RenderMode::Download),
        }
    }

    fn customization(&self) -> Result<CustomizationState, AppError> {
        let catalog = CustomizationCatalog::get();
        let mut state = CustomizationState::default();
        if let Some(id) = self.background.as_deref() {
            let background = catalog
                .background(id)
                .ok_or_else(|| AppError::invalid_request(format!("Unknown background '{id}'")))?;
            state = state.with_background(background.clone());
        }
        if let Some(id) = self.qr_pattern.as_deref() {
            let pattern = catalog
                .qr_pattern(id)
                .ok_or_else(|| AppError::invalid_request(format!("Unknown QR pattern '{id}'")))?;
            state = state.with_qr_pattern(pattern.clone());
        }
        Ok(state)
    }
}

async fn load(state: &ServerState, id: i64) -> ServiceResult<VCardRecord> {
    let record = vcard::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ContactNotFound, format!("Contact {id} not found"))
    })?;
    Ok(record)
}

/// `.vcf` attachment for a contact, suffix id resolved to its text
pub(crate) async fn vcf_attachment(
    state: &ServerState,
    data: &ContactData,
) -> ServiceResult<Response> {
    let suffix = vcard::suffix_text(&state.pool, data).await?;
    let text = to_vcf(
        data,
        &VcfOptions {
            suffix: suffix.as_deref(),
            base_url: Some(state.config.base_url()),
        },
    );
    Ok(files::attachment(
        text,
        files::VCARD,
        &files::vcf_filename(data),
    ))
}

/// POST /api/vcards - validate and persist a contact
pub async fn store(
    State(state): State<ServerState>,
    Json(data): Json<ContactData>,
) -> ServiceResult<(StatusCode, Json<VCardRecord>)> {
    validate_contact(&data)?;

    let id = vcard::create(&state.pool, &data).await?;
    let record = load(&state, id).await?;

    tracing::info!(vcard_id = id, name = %record.contact.full_name(), "vCard stored");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/vcards/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<VCardRecord>> {
    let record = load(&state, id).await?;
    Ok(Json(record))
}

/// GET /api/vcards/{id}/card.jpg?mode=&background=&qr_pattern=
pub async fn card_jpeg(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<CardQuery>,
) -> ServiceResult<Response> {
    let mode = query.mode()?;
    let customization = query.customization()?;
    let record = load(&state, id).await?;

    let bytes = state
        .renderer
        .render_jpeg(&record.contact, &customization, mode)
        .await?;
    Ok(files::attachment(
        bytes,
        files::JPEG,
        &download_filename(&record.contact),
    ))
}

/// GET /api/vcards/{id}/vcf
pub async fn vcf(State(state): State<ServerState>, Path(id): Path<i64>) -> ServiceResult<Response> {
    let record = load(&state, id).await?;
    vcf_attachment(&state, &record.contact).await
}
