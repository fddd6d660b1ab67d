//! Customization catalog API
//!
//! Read-only: backgrounds, QR patterns and icon choices per field. The
//! first entry of each list is the default selection.

use axum::{Json, Router, routing::get};
use shared::models::{CustomizationCatalog, CustomizationState};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/customization", get(catalog))
        .route("/api/customization/default", get(default_state))
}

/// GET /api/customization - every selectable option
async fn catalog() -> Json<CustomizationCatalog> {
    Json(CustomizationCatalog::get())
}

/// GET /api/customization/default - initial selection
async fn default_state() -> Json<CustomizationState> {
    Json(CustomizationState::default())
}
