//! Bundled fonts (DejaVu Sans, see `assets/fonts/LICENSE`)

use rusttype::{Font, Scale, point};

use crate::error::{RenderError, RenderResult};

static REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Regular and bold faces used for all card text
#[derive(Clone)]
pub struct Fonts {
    regular: Font<'static>,
    bold: Font<'static>,
}

impl std::fmt::Debug for Fonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonts")
            .field("regular_glyphs", &self.regular.glyph_count())
            .field("bold_glyphs", &self.bold.glyph_count())
            .finish()
    }
}

impl Fonts {
    pub fn bundled() -> RenderResult<Self> {
        let regular =
            Font::try_from_bytes(REGULAR).ok_or(RenderError::Font("DejaVuSans.ttf"))?;
        let bold = Font::try_from_bytes(BOLD).ok_or(RenderError::Font("DejaVuSans-Bold.ttf"))?;
        Ok(Self { regular, bold })
    }

    pub fn face(&self, bold: bool) -> &Font<'static> {
        if bold { &self.bold } else { &self.regular }
    }

    /// rusttype scale for a CSS-style font size (em height in px)
    pub fn scale(&self, size: f32, bold: bool) -> Scale {
        let font = self.face(bold);
        let v = font.v_metrics_unscaled();
        let upem = font.units_per_em().max(1) as f32;
        Scale::uniform(size * (v.ascent - v.descent) / upem)
    }

    /// Drop characters the face cannot draw and any whitespace they leave
    /// at the start of the line (emoji icons, mostly).
    pub fn drawable(&self, text: &str, bold: bool) -> String {
        let font = self.face(bold);
        let kept: String = text
            .chars()
            .filter(|c| c.is_whitespace() || font.glyph(*c).id().0 != 0)
            .collect();
        kept.trim_start().to_string()
    }

    /// Advance width of `text` in px
    pub fn text_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        let font = self.face(bold);
        let scale = self.scale(size, bold);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}
