//! HTTP API
//!
//! Each submodule exposes `router()`; [`build_app`] merges them and adds
//! the middleware stack.

pub mod customization;
pub mod files;
pub mod health;
pub mod preview;
pub mod shorten;
pub mod suffixes;
pub mod upload;
pub mod vcards;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Room for multipart framing on top of the upload limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public routes
        .merge(health::router())
        .merge(shorten::router())
        // Catalogs
        .merge(suffixes::router())
        .merge(customization::router())
        // Cards
        .merge(vcards::router())
        .merge(preview::router())
        .merge(upload::router())
        .fallback(route_not_found)
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Fully configured application, used by the server and by oneshot tests
pub fn build_app(state: ServerState) -> Router {
    health::mark_started();

    build_router()
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_bytes + MULTIPART_OVERHEAD,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
