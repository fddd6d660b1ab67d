//! Suffix API Handlers

use axum::{Json, extract::State};
use shared::models::Suffix;

use crate::core::ServerState;
use crate::db::repository::suffix;
use crate::error::ServiceResult;

/// GET /api/suffixes - suffix choices for the name form, "None" first
pub async fn list(State(state): State<ServerState>) -> ServiceResult<Json<Vec<Suffix>>> {
    let suffixes = suffix::find_all(&state.pool).await?;
    Ok(Json(suffixes))
}
