//! Rasterizer
//!
//! Paints a [`Scene`] onto an opaque RGBA surface. Edges are antialiased
//! with signed-distance coverage sampled at pixel centers, so output depends
//! only on the scene and the slot bitmaps.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use rusttype::point;

use crate::font::Fonts;
use crate::scene::{Clip, DrawOp, ImageSlot, Rect, Scene, TextAlign, TextStyle};

/// Bitmaps resolved for the image slots of a scene
#[derive(Debug, Default, Clone)]
pub struct SlotImages {
    pub photo: Option<RgbaImage>,
    pub logo: Option<RgbaImage>,
    pub qr: Option<RgbaImage>,
}

impl SlotImages {
    pub fn get(&self, slot: ImageSlot) -> Option<&RgbaImage> {
        match slot {
            ImageSlot::Photo => self.photo.as_ref(),
            ImageSlot::Logo => self.logo.as_ref(),
            ImageSlot::Qr => self.qr.as_ref(),
        }
    }
}

/// Paint every op of `scene` in order
pub fn paint(scene: &Scene, images: &SlotImages, fonts: &Fonts) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(scene.width, scene.height, Rgba([255, 255, 255, 255]));

    for op in &scene.ops {
        match op {
            DrawOp::LinearGradient {
                from,
                to,
                start,
                end,
            } => fill_gradient(&mut canvas, from.rgb(), to.rgb(), *start, *end),
            DrawOp::Shadow {
                rect,
                radius,
                blur,
                offset,
                color,
            } => draw_shadow(&mut canvas, rect, *radius, *blur, *offset, *color),
            DrawOp::RoundedRect { rect, radius, fill } => {
                fill_rounded_rect(&mut canvas, rect, *radius, fill.rgb())
            }
            DrawOp::Image { slot, rect, clip } => {
                if let Some(src) = images.get(*slot) {
                    draw_image(&mut canvas, src, rect, *clip);
                }
            }
            DrawOp::Text { text, x, y, style } => draw_text(&mut canvas, fonts, text, *x, *y, style),
        }
    }

    canvas
}

/// `src` over `dst` with opacity `alpha`
fn blend(dst: &mut Rgba<u8>, src: [u8; 3], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let a = alpha.min(1.0);
    let inv = 1.0 - a;
    for i in 0..3 {
        dst.0[i] = (src[i] as f32 * a + dst.0[i] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn fill_gradient(canvas: &mut RgbaImage, from: [u8; 3], to: [u8; 3], start: (f32, f32), end: (f32, f32)) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len2 = (dx * dx + dy * dy).max(f32::EPSILON);
    for (x, y, px) in canvas.enumerate_pixels_mut() {
        let (cx, cy) = (x as f32 + 0.5 - start.0, y as f32 + 0.5 - start.1);
        let t = ((cx * dx + cy * dy) / len2).clamp(0.0, 1.0);
        *px = Rgba([
            lerp(from[0], to[0], t),
            lerp(from[1], to[1], t),
            lerp(from[2], to[2], t),
            255,
        ]);
    }
}

/// Signed distance from a rounded rect (negative inside)
fn rounded_rect_sdf(rect: &Rect, radius: f32, px: f32, py: f32) -> f32 {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    let (hw, hh) = (rect.w / 2.0, rect.h / 2.0);
    let qx = (px - (rect.x + hw)).abs() - hw + r;
    let qy = (py - (rect.y + hh)).abs() - hh + r;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - r
}

fn coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

fn rounded_rect_coverage(rect: &Rect, radius: f32, px: f32, py: f32) -> Option<f32> {
    let c = coverage(rounded_rect_sdf(rect, radius, px, py));
    (c > 0.0).then_some(c)
}

fn clip_coverage(clip: Clip, rect: &Rect, px: f32, py: f32) -> f32 {
    match clip {
        Clip::None => 1.0,
        Clip::Circle => {
            let r = rect.w.min(rect.h) / 2.0;
            let (cx, cy) = (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
            coverage(((px - cx).powi(2) + (py - cy).powi(2)).sqrt() - r)
        }
        Clip::RoundedRect { radius } => coverage(rounded_rect_sdf(rect, radius, px, py)),
    }
}

/// Collect results of `f` over pixels touched by `rect`, clamped to the canvas
fn covered_pixels<T>(
    (w, h): &(u32, u32),
    rect: &Rect,
    mut f: impl FnMut(u32, u32, f32, f32) -> Option<T>,
) -> Vec<T> {
    let x0 = rect.x.floor().max(0.0) as u32;
    let y0 = rect.y.floor().max(0.0) as u32;
    let x1 = (rect.right().ceil().max(0.0) as u32).min(*w);
    let y1 = (rect.bottom().ceil().max(0.0) as u32).min(*h);
    let mut out = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(v) = f(x, y, x as f32 + 0.5, y as f32 + 0.5) {
                out.push(v);
            }
        }
    }
    out
}

fn fill_rounded_rect(canvas: &mut RgbaImage, rect: &Rect, radius: f32, rgb: [u8; 3]) {
    let covered = covered_pixels(&canvas.dimensions(), rect, |x, y, cx, cy| {
        rounded_rect_coverage(rect, radius, cx, cy).map(|c| (x, y, c))
    });
    for (x, y, c) in covered {
        blend(canvas.get_pixel_mut(x, y), rgb, c);
    }
}

fn draw_shadow(
    canvas: &mut RgbaImage,
    rect: &Rect,
    radius: f32,
    blur: f32,
    offset: (f32, f32),
    color: [u8; 4],
) {
    let shifted = Rect::new(rect.x + offset.0, rect.y + offset.1, rect.w, rect.h);
    let (w, h) = canvas.dimensions();
    let mut mask = GrayImage::new(w, h);
    for (x, y, c) in covered_pixels(&(w, h), &shifted, |x, y, cx, cy| {
        rounded_rect_coverage(&shifted, radius, cx, cy).map(|c| (x, y, c))
    }) {
        mask.put_pixel(x, y, Luma([(c * 255.0).round() as u8]));
    }

    // Canvas shadowBlur is twice the gaussian sigma
    let sigma = blur / 2.0;
    let mask = if sigma > 0.0 {
        imageops::blur(&mask, sigma)
    } else {
        mask
    };

    let [r, g, b, a] = color;
    let opacity = a as f32 / 255.0;
    for (x, y, m) in mask.enumerate_pixels() {
        let m = m.0[0] as f32 / 255.0;
        if m > 0.0 {
            blend(canvas.get_pixel_mut(x, y), [r, g, b], m * opacity);
        }
    }
}

fn draw_image(canvas: &mut RgbaImage, src: &RgbaImage, rect: &Rect, clip: Clip) {
    let tw = rect.w.round().max(1.0) as u32;
    let th = rect.h.round().max(1.0) as u32;
    let resized = imageops::resize(src, tw, th, FilterType::Triangle);
    let ox = rect.x.round() as i64;
    let oy = rect.y.round() as i64;
    let (cw, ch) = canvas.dimensions();

    for (sx, sy, p) in resized.enumerate_pixels() {
        let (x, y) = (ox + sx as i64, oy + sy as i64);
        if x < 0 || y < 0 || x >= cw as i64 || y >= ch as i64 {
            continue;
        }
        let cover = clip_coverage(clip, rect, x as f32 + 0.5, y as f32 + 0.5);
        let alpha = cover * p.0[3] as f32 / 255.0;
        blend(
            canvas.get_pixel_mut(x as u32, y as u32),
            [p.0[0], p.0[1], p.0[2]],
            alpha,
        );
    }
}

fn draw_text(canvas: &mut RgbaImage, fonts: &Fonts, text: &str, x: f32, y: f32, style: &TextStyle) {
    let text = fonts.drawable(text, style.bold);
    if text.is_empty() {
        return;
    }
    let font = fonts.face(style.bold);
    let scale = fonts.scale(style.size, style.bold);
    let start_x = match style.align {
        TextAlign::Left => x,
        TextAlign::Center => x - fonts.text_width(&text, style.size, style.bold) / 2.0,
    };
    let rgb = style.color.rgb();
    let (cw, ch) = canvas.dimensions();

    for glyph in font.layout(&text, scale, point(start_x, y)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px as u32 >= cw || py as u32 >= ch {
                return;
            }
            blend(canvas.get_pixel_mut(px as u32, py as u32), rgb, v);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;
    use shared::models::HexColor;

    fn fonts() -> Fonts {
        Fonts::bundled().unwrap()
    }

    #[test]
    fn test_gradient_endpoints() {
        let mut b = SceneBuilder::new(100, 50, 1.0);
        b.gradient(HexColor::from_u32(0xff0000), HexColor::from_u32(0x0000ff));
        let img = paint(&b.build(), &SlotImages::default(), &fonts());
        let tl = img.get_pixel(0, 0);
        let br = img.get_pixel(99, 49);
        assert!(tl.0[0] > 240 && tl.0[2] < 15);
        assert!(br.0[2] > 240 && br.0[0] < 15);
    }

    #[test]
    fn test_rounded_rect_corners_antialiased() {
        let mut b = SceneBuilder::new(40, 40, 1.0);
        b.gradient(HexColor::BLACK, HexColor::BLACK).rounded_rect(
            Rect::new(5.0, 5.0, 30.0, 30.0),
            8.0,
            HexColor::WHITE,
        );
        let img = paint(&b.build(), &SlotImages::default(), &fonts());
        // Center filled, outer corner untouched
        assert_eq!(*img.get_pixel(20, 20), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(2, 20), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_circle_clip_leaves_corners() {
        let mut b = SceneBuilder::new(20, 20, 1.0);
        b.gradient(HexColor::WHITE, HexColor::WHITE).image(
            ImageSlot::Photo,
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Clip::Circle,
        );
        let images = SlotImages {
            photo: Some(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))),
            ..SlotImages::default()
        };
        let img = paint(&b.build(), &images, &fonts());
        assert_eq!(*img.get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_slot_is_skipped() {
        let mut b = SceneBuilder::new(20, 20, 1.0);
        b.gradient(HexColor::WHITE, HexColor::WHITE).image(
            ImageSlot::Logo,
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Clip::None,
        );
        let img = paint(&b.build(), &SlotImages::default(), &fonts());
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_text_draws_ink() {
        let style = TextStyle {
            size: 16.0,
            bold: true,
            color: HexColor::BLACK,
            align: TextAlign::Left,
        };
        let mut b = SceneBuilder::new(120, 30, 1.0);
        b.gradient(HexColor::WHITE, HexColor::WHITE)
            .text("Ada", 4.0, 20.0, style);
        let img = paint(&b.build(), &SlotImages::default(), &fonts());
        assert!(img.pixels().any(|p| p.0[0] < 128));
    }

    #[test]
    fn test_shadow_darkens_below_card() {
        let mut b = SceneBuilder::new(60, 60, 1.0);
        b.gradient(HexColor::WHITE, HexColor::WHITE).shadow(
            Rect::new(10.0, 10.0, 30.0, 30.0),
            4.0,
            4.0,
            (5.0, 5.0),
            [0, 0, 0, 128],
        );
        let img = paint(&b.build(), &SlotImages::default(), &fonts());
        assert!(img.get_pixel(42, 42).0[0] < 255);
        assert_eq!(*img.get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    }
}
