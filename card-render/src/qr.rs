//! QR code adapter
//!
//! Maps a [`QrPattern`] onto the encoder and rasterizes the module grid to
//! the requested pixel width, quiet zone included.

use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use shared::models::{EcLevel, MAX_QR_MARGIN, QrPattern};
use tracing::instrument;

use crate::error::QrError;

fn ec_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

/// Encode `url` as a square RGBA bitmap `width` pixels wide.
///
/// When `width` is smaller than the symbol plus margin, each module is drawn
/// 1 px wide and the bitmap comes out at the symbol's own size. The margin is
/// clamped to [`MAX_QR_MARGIN`] modules.
#[instrument(skip(pattern), fields(pattern = %pattern.id))]
pub fn generate_qr(url: &str, pattern: &QrPattern, width: u32) -> Result<RgbaImage, QrError> {
    if url.trim().is_empty() {
        return Err(QrError::EmptyPayload);
    }

    let code = QrCode::with_error_correction_level(url.as_bytes(), ec_level(pattern.ec_level))
        .map_err(|e| QrError::Encode(e.to_string()))?;

    let size = code.width();
    let modules = code.to_colors();
    let quiet = pattern.margin.min(MAX_QR_MARGIN);
    let total = (size as u32).saturating_add(quiet.saturating_mul(2));

    let symbol_size = width.max(total);
    let scale = symbol_size as f32 / total as f32;
    let margin = quiet as f32 * scale;

    let colors = pattern.colors();
    let dark = rgba(colors.dark.rgb());
    let light = rgba(colors.light.rgb());
    let last = size.saturating_sub(1);

    Ok(RgbaImage::from_fn(symbol_size, symbol_size, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        let inside = fx >= margin
            && fy >= margin
            && fx < symbol_size as f32 - margin
            && fy < symbol_size as f32 - margin;
        if !inside {
            return light;
        }
        let col = (((fx - margin) / scale) as usize).min(last);
        let row = (((fy - margin) / scale) as usize).min(last);
        match modules[row * size + col] {
            Color::Dark => dark,
            Color::Light => light,
        }
    }))
}

/// [`generate_qr`] on the blocking pool
pub async fn generate_qr_async(
    url: String,
    pattern: QrPattern,
    width: u32,
) -> Result<RgbaImage, QrError> {
    tokio::task::spawn_blocking(move || generate_qr(&url, &pattern, width))
        .await
        .map_err(|e| QrError::Encode(e.to_string()))?
}

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 0xFF])
}
