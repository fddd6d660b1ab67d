//! Render modes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RenderError;

/// Output resolution of a card render
///
/// | Mode | Canvas | Scale | Address | URL | QR bitmap |
/// |------|--------|-------|---------|-----|-----------|
/// | inline | 420×240 | 1 | 40 | 20 | 80 |
/// | modal | 840×480 | 2 | 60 | 30 | 160 |
/// | download | 1050×600 | 2.5 | 100 | 50 | 400 |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Inline,
    Modal,
    Download,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [Self::Inline, Self::Modal, Self::Download];

    /// Canvas width and height in pixels
    pub const fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Inline => (420, 240),
            Self::Modal => (840, 480),
            Self::Download => (1050, 600),
        }
    }

    /// Multiplier applied to every layout constant
    pub const fn scale(&self) -> f32 {
        match self {
            Self::Inline => 1.0,
            Self::Modal => 2.0,
            Self::Download => 2.5,
        }
    }

    /// Max characters of the address line before truncation
    pub const fn address_budget(&self) -> usize {
        match self {
            Self::Inline => 40,
            Self::Modal => 60,
            Self::Download => 100,
        }
    }

    /// Max characters of the displayed website URL before truncation
    pub const fn url_budget(&self) -> usize {
        match self {
            Self::Inline => 20,
            Self::Modal => 30,
            Self::Download => 50,
        }
    }

    /// Pixel width of the generated QR bitmap
    pub const fn qr_bitmap_width(&self) -> u32 {
        match self {
            Self::Inline => 80,
            Self::Modal => 160,
            Self::Download => 400,
        }
    }

    /// Only the download render carries a drop shadow
    pub const fn has_shadow(&self) -> bool {
        matches!(self, Self::Download)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Modal => "modal",
            Self::Download => "download",
        }
    }
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "modal" => Ok(Self::Modal),
            "download" => Ok(Self::Download),
            other => Err(RenderError::UnknownMode(other.to_string())),
        }
    }
}
