//! Shared types for the LAVA card and link toolkit
//!
//! Common types used by the renderer and the HTTP service: contact
//! records, card customization options, short-link records, the unified
//! error system, and vCard export.

pub mod error;
pub mod models;
pub mod util;
pub mod vcf;

pub use models::{ContactData, ContactField, CustomizationState};
