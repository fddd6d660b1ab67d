//! # lava-server
//!
//! HTTP service of the LAVA vCard generator: stores cards in SQLite,
//! renders previews and downloads through `card-render`, accepts photo and
//! logo uploads, and runs a small URL shortener.
//!
//! ## Module structure
//!
//! ```text
//! lava-server/src/
//! ├── api/       # axum routers and handlers
//! ├── cache.rs   # TTL key-value cache
//! ├── core/      # config, state, server
//! ├── db/        # pool, migrations, repositories
//! ├── error.rs   # ServiceError
//! ├── services/  # shortener
//! └── utils/     # logging, validation
//! ```

pub mod api;
pub mod cache;
pub mod core;
pub mod db;
pub mod error;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use db::DbService;
