//! URL shortener API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/shorten | POST | create a short link |
//! | /api/shorten/{code} | GET | record and click count |
//! | /s/{code} | GET | 302 to the original URL, counts a click |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/shorten", post(handler::shorten))
        .route("/api/shorten/{code}", get(handler::stats))
        .route("/s/{code}", get(handler::redirect))
}
