//! Export encoders

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use shared::models::ContactData;

use crate::error::RenderResult;

/// JPEG quality of downloaded cards
pub const JPEG_QUALITY: u8 = 90;

const FILENAME_FALLBACK: &str = "contact";
const FILENAME_SUFFIX: &str = "_card.jpg";

/// Encode a rendered card as JPEG (alpha dropped)
pub fn encode_jpeg(img: &RgbaImage) -> RenderResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Encode a rendered card as PNG
pub fn encode_png(img: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_with_encoder(PngEncoder::new(Cursor::new(&mut buffer)))?;
    Ok(buffer)
}

/// `<full name>_card.jpg`, or `contact_card.jpg` for a nameless card
pub fn download_filename(data: &ContactData) -> String {
    let name = data.full_name();
    let stem = if name.is_empty() {
        FILENAME_FALLBACK
    } else {
        name.as_str()
    };
    format!("{stem}{FILENAME_SUFFIX}")
}
