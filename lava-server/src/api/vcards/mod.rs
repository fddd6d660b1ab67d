//! Stored card API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/vcards | POST | validate and store a card |
//! | /api/vcards/{id} | GET | stored card as form data |
//! | /api/vcards/{id}/card.jpg | GET | rendered card download |
//! | /api/vcards/{id}/vcf | GET | vCard 3.0 export |

mod handler;

pub(crate) use handler::vcf_attachment;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/vcards", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::store))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/card.jpg", get(handler::card_jpeg))
        .route("/{id}/vcf", get(handler::vcf))
}
