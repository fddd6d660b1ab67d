//! # card-render
//!
//! Business card compositor for the LAVA vCard generator.
//!
//! ## Scope
//!
//! This crate handles HOW a card is drawn:
//! - Mode-keyed canvas geometry (inline, modal, download)
//! - Background gradient, card frame and drop shadow
//! - Photo/logo loading (bytes, `data:` URIs, stored uploads, remote URLs)
//! - QR code generation with the selected pattern
//! - Text layout with the bundled DejaVu fonts
//! - JPEG/PNG export and debounced live preview
//!
//! WHAT the card says (validation, persistence, routing) stays in the
//! application code: lava-server.
//!
//! Rendering is split in two: [`layout::compose`] turns the inputs into a
//! [`Scene`] (a display list in canvas pixels) and [`raster::paint`] draws
//! that list onto an RGBA surface. The split keeps geometry testable
//! without comparing pixels.
//!
//! ## Example
//!
//! ```ignore
//! use card_render::{CardRenderer, ImageLoader, LoaderConfig, RenderMode};
//! use shared::models::{ContactData, ContactField, CustomizationState};
//!
//! let renderer = CardRenderer::new(ImageLoader::new(LoaderConfig::default()))?;
//! let data = ContactData::default()
//!     .with(ContactField::FirstName, "Ada")
//!     .with(ContactField::Website, "https://lava.example");
//!
//! let jpeg = renderer
//!     .render_jpeg(&data, &CustomizationState::default(), RenderMode::Download)
//!     .await?;
//! ```

mod error;
mod export;
mod font;
mod loader;
mod mode;
mod preview;
mod qr;
mod renderer;
mod scene;
mod text;

pub mod layout;
pub mod raster;

// Re-exports
pub use error::{LoadError, QrError, RenderError, RenderResult};
pub use export::{JPEG_QUALITY, download_filename, encode_jpeg, encode_png};
pub use font::Fonts;
pub use loader::{ImageLoader, ImageSource, LoaderConfig, UPLOAD_URL_PREFIX};
pub use mode::RenderMode;
pub use preview::{DebounceHandle, debounce};
pub use qr::{generate_qr, generate_qr_async};
pub use renderer::{CardRenderer, CardRequest};
pub use scene::{Clip, DrawOp, ImageSlot, Rect, Scene, SceneBuilder, TextAlign, TextStyle};
pub use text::{address_line, role_line, strip_scheme, truncate_with_ellipsis};
