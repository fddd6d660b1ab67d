//! Data models
//!
//! Shared between lava-server, card-render and the frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod contact;
pub mod customization;
pub mod short_url;
pub mod suffix;

// Re-exports
pub use contact::*;
pub use customization::*;
pub use short_url::*;
pub use suffix::*;
