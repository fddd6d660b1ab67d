//! Unsaved card rendering
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/vcard/preview?mode= | POST | PNG preview of a `CardRequest` |
//! | /api/vcard/download | POST | JPEG download at print resolution |
//! | /api/vcard/vcf | POST | vCard 3.0 export of form data |
//! | /api/vcard/preview/ws | GET | live preview WebSocket |
//!
//! The live channel takes JSON `CardRequest` snapshots as text frames and
//! answers with binary PNG frames. Snapshots arriving within the debounce
//! window collapse into one render of the newest.

mod handler;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use tower::limit::ConcurrencyLimitLayer;

use crate::core::ServerState;

/// Concurrent one-shot renders; live sessions are not counted
const MAX_CONCURRENT_RENDERS: usize = 16;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/vcard", routes())
}

fn routes() -> Router<ServerState> {
    let renders = Router::new()
        .route("/preview", post(handler::preview))
        .route("/download", post(handler::download))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_RENDERS));

    Router::new()
        .merge(renders)
        .route("/preview/ws", get(ws::handle_preview_ws))
        .route("/vcf", post(handler::vcf))
}
