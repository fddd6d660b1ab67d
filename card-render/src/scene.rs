//! Display list produced by layout and consumed by the rasterizer
//!
//! Coordinates are canvas pixels. [`Scene::normalized`] divides every
//! length by the scale factor, which is how renders of different modes are
//! compared.

use shared::models::HexColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    fn scaled(&self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.w * k, self.h * k)
    }
}

/// Clip path applied to an image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    None,
    /// Circle inscribed in the target rect
    Circle,
    RoundedRect { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    /// `x` is the horizontal center of the line
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in px (em height)
    pub size: f32,
    pub bold: bool,
    pub color: HexColor,
    pub align: TextAlign,
}

/// Which resolved bitmap an image op draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Photo,
    Logo,
    Qr,
}

/// A single drawing instruction, painted in list order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Two-stop gradient over the whole canvas, from `start` to `end`
    LinearGradient {
        from: HexColor,
        to: HexColor,
        start: (f32, f32),
        end: (f32, f32),
    },
    /// Blurred silhouette of a rounded rect
    Shadow {
        rect: Rect,
        radius: f32,
        blur: f32,
        offset: (f32, f32),
        color: [u8; 4],
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: HexColor,
    },
    Image {
        slot: ImageSlot,
        rect: Rect,
        clip: Clip,
    },
    /// `y` is the alphabetic baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

impl DrawOp {
    fn scaled(&self, k: f32) -> Self {
        match self {
            Self::LinearGradient {
                from,
                to,
                start,
                end,
            } => Self::LinearGradient {
                from: *from,
                to: *to,
                start: (start.0 * k, start.1 * k),
                end: (end.0 * k, end.1 * k),
            },
            Self::Shadow {
                rect,
                radius,
                blur,
                offset,
                color,
            } => Self::Shadow {
                rect: rect.scaled(k),
                radius: radius * k,
                blur: blur * k,
                offset: (offset.0 * k, offset.1 * k),
                color: *color,
            },
            Self::RoundedRect { rect, radius, fill } => Self::RoundedRect {
                rect: rect.scaled(k),
                radius: radius * k,
                fill: *fill,
            },
            Self::Image { slot, rect, clip } => Self::Image {
                slot: *slot,
                rect: rect.scaled(k),
                clip: match clip {
                    Clip::RoundedRect { radius } => Clip::RoundedRect { radius: radius * k },
                    other => *other,
                },
            },
            Self::Text { text, x, y, style } => Self::Text {
                text: text.clone(),
                x: x * k,
                y: y * k,
                style: TextStyle {
                    size: style.size * k,
                    ..*style
                },
            },
        }
    }

    /// Text content, if this is a text op
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Ordered drawing instructions for one canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// The same scene with every length divided by `scale`
    pub fn normalized(&self) -> Scene {
        let k = 1.0 / self.scale;
        Scene {
            width: (self.width as f32 * k).round() as u32,
            height: (self.height as f32 * k).round() as u32,
            scale: 1.0,
            ops: self.ops.iter().map(|op| op.scaled(k)).collect(),
        }
    }

    /// All text lines in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }

    /// Image ops targeting `slot`
    pub fn images(&self, slot: ImageSlot) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Image { slot: s, .. } if *s == slot))
    }

    pub fn has_shadow(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Shadow { .. }))
    }
}

/// Accumulates [`DrawOp`]s for a canvas
#[derive(Debug)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            scene: Scene {
                width,
                height,
                scale,
                ops: Vec::new(),
            },
        }
    }

    /// Diagonal gradient, top-left to bottom-right
    pub fn gradient(&mut self, from: HexColor, to: HexColor) -> &mut Self {
        let (w, h) = (self.scene.width as f32, self.scene.height as f32);
        self.scene.ops.push(DrawOp::LinearGradient {
            from,
            to,
            start: (0.0, 0.0),
            end: (w, h),
        });
        self
    }

    pub fn shadow(
        &mut self,
        rect: Rect,
        radius: f32,
        blur: f32,
        offset: (f32, f32),
        color: [u8; 4],
    ) -> &mut Self {
        self.scene.ops.push(DrawOp::Shadow {
            rect,
            radius,
            blur,
            offset,
            color,
        });
        self
    }

    pub fn rounded_rect(&mut self, rect: Rect, radius: f32, fill: HexColor) -> &mut Self {
        self.scene
            .ops
            .push(DrawOp::RoundedRect { rect, radius, fill });
        self
    }

    pub fn image(&mut self, slot: ImageSlot, rect: Rect, clip: Clip) -> &mut Self {
        self.scene.ops.push(DrawOp::Image { slot, rect, clip });
        self
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle) -> &mut Self {
        self.scene.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            style,
        });
        self
    }

    pub fn build(self) -> Scene {
        self.scene
    }
}
