//! Card renderer

use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use shared::models::{ContactData, ContactField, CustomizationState};
use tracing::{debug, instrument, warn};

use crate::error::{RenderError, RenderResult};
use crate::export::{encode_jpeg, encode_png};
use crate::font::Fonts;
use crate::layout::{Slots, compose};
use crate::loader::{ImageLoader, ImageSource};
use crate::mode::RenderMode;
use crate::qr::generate_qr_async;
use crate::raster::{SlotImages, paint};

/// Everything a render depends on, captured as one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRequest {
    #[serde(default)]
    pub data: ContactData,
    #[serde(default)]
    pub customization: CustomizationState,
    #[serde(default)]
    pub mode: RenderMode,
}

/// Renders business cards; cheap to clone and share between tasks
#[derive(Debug, Clone)]
pub struct CardRenderer {
    loader: ImageLoader,
    fonts: Arc<Fonts>,
}

impl CardRenderer {
    pub fn new(loader: ImageLoader) -> RenderResult<Self> {
        Ok(Self {
            loader,
            fonts: Arc::new(Fonts::bundled()?),
        })
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    /// Render a card to an RGBA surface of the mode's dimensions.
    ///
    /// Image and QR failures are logged and leave their slot blank; only
    /// a failed paint task is an error.
    #[instrument(skip_all, fields(mode = mode.as_str()))]
    pub async fn render(
        &self,
        data: &ContactData,
        customization: &CustomizationState,
        mode: RenderMode,
    ) -> RenderResult<RgbaImage> {
        let photo = data
            .get(ContactField::Photo)
            .and_then(ImageSource::from_field);
        let logo = data.get(ContactField::Logo).and_then(ImageSource::from_field);

        let qr = async {
            let url = data.get(ContactField::Website)?;
            match generate_qr_async(
                url.to_string(),
                customization.qr_pattern.clone(),
                mode.qr_bitmap_width(),
            )
            .await
            {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!(error = %e, "QR generation failed, QR omitted");
                    None
                }
            }
        };

        let ((photo, logo), qr) = tokio::join!(self.loader.load_pair(photo, logo), qr);

        let slots = Slots {
            photo: photo.is_some(),
            logo: logo.is_some(),
            qr: qr.is_some(),
        };
        let scene = compose(data, customization, mode, slots);
        debug!(ops = scene.ops.len(), ?slots, "scene composed");

        let images = SlotImages { photo, logo, qr };
        let fonts = Arc::clone(&self.fonts);
        tokio::task::spawn_blocking(move || paint(&scene, &images, &fonts))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))
    }

    pub async fn render_request(&self, request: &CardRequest) -> RenderResult<RgbaImage> {
        self.render(&request.data, &request.customization, request.mode)
            .await
    }

    /// Render and encode as JPEG (download export)
    pub async fn render_jpeg(
        &self,
        data: &ContactData,
        customization: &CustomizationState,
        mode: RenderMode,
    ) -> RenderResult<Vec<u8>> {
        let img = self.render(data, customization, mode).await?;
        encode_jpeg(&img)
    }

    /// Render and encode as PNG (previews)
    pub async fn render_png(
        &self,
        data: &ContactData,
        customization: &CustomizationState,
        mode: RenderMode,
    ) -> RenderResult<Vec<u8>> {
        let img = self.render(data, customization, mode).await?;
        encode_png(&img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoaderConfig;
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn renderer() -> CardRenderer {
        CardRenderer::new(ImageLoader::new(LoaderConfig::default())).unwrap()
    }

    fn red_data_uri() -> String {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(buf))
    }

    fn sample() -> ContactData {
        ContactData::default()
            .with(ContactField::FirstName, "Ada")
            .with(ContactField::LastName, "Lovelace")
            .with(ContactField::Email, "ada@example.com")
            .with(ContactField::Website, "https://lava.example")
    }

    fn region_is_white(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
        (y0..y1).all(|y| (x0..x1).all(|x| *img.get_pixel(x, y) == WHITE))
    }

    #[tokio::test]
    async fn test_dimensions_per_mode() {
        let r = renderer();
        for mode in RenderMode::ALL {
            let img = r
                .render(&sample(), &CustomizationState::default(), mode)
                .await
                .unwrap();
            assert_eq!(img.dimensions(), mode.dimensions());
        }
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let r = renderer();
        let data = sample().with(ContactField::Photo, red_data_uri());
        let custom = CustomizationState::default();
        let a = r.render(&data, &custom, RenderMode::Download).await.unwrap();
        let b = r.render(&data, &custom, RenderMode::Download).await.unwrap();
        assert!(a == b);
    }

    #[tokio::test]
    async fn test_photo_drawn_in_circle_slot() {
        let data = sample().with(ContactField::Photo, red_data_uri());
        let img = renderer()
            .render(&data, &CustomizationState::default(), RenderMode::Inline)
            .await
            .unwrap();
        // Photo slot is (24, 24, 50, 50)
        assert_eq!(*img.get_pixel(49, 49), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(25, 25), WHITE);
    }

    #[tokio::test]
    async fn test_broken_images_leave_slots_blank() {
        let data = sample()
            .with(ContactField::Photo, "data:image/png;base64,AAAA")
            .with(ContactField::Logo, "http://127.0.0.1:1/logo.png");
        let img = renderer()
            .render(&data, &CustomizationState::default(), RenderMode::Inline)
            .await
            .unwrap();
        assert!(region_is_white(&img, 24, 24, 74, 74));
        assert!(region_is_white(&img, 356, 24, 396, 64));
    }

    #[tokio::test]
    async fn test_qr_omitted_without_website() {
        let r = renderer();
        let custom = CustomizationState::default();

        let with_qr = r.render(&sample(), &custom, RenderMode::Inline).await.unwrap();
        assert!(!region_is_white(&with_qr, 336, 136, 396, 224));

        let data = sample().with(ContactField::Website, "");
        let without = r.render(&data, &custom, RenderMode::Inline).await.unwrap();
        assert!(region_is_white(&without, 336, 136, 396, 224));
    }

    #[tokio::test]
    async fn test_qr_failure_is_not_fatal() {
        let data = sample().with(
            ContactField::Website,
            format!("https://lava.example/{}", "x".repeat(4000)),
        );
        let img = renderer()
            .render(&data, &CustomizationState::default(), RenderMode::Inline)
            .await
            .unwrap();
        assert!(region_is_white(&img, 336, 136, 396, 224));
    }

    #[tokio::test]
    async fn test_shadow_only_in_download() {
        let r = renderer();
        let custom = CustomizationState::default();
        let img = r.render(&sample(), &custom, RenderMode::Download).await.unwrap();
        let plain = {
            let scene = compose(&sample(), &custom, RenderMode::Download, Slots::default());
            let scene = crate::scene::Scene {
                ops: scene
                    .ops
                    .into_iter()
                    .filter(|op| !matches!(op, crate::scene::DrawOp::Shadow { .. }))
                    .collect(),
                ..scene
            };
            paint(&scene, &SlotImages::default(), &Fonts::bundled().unwrap())
        };
        // Just right of the card edge, inside the offset shadow
        let (x, y) = (1012, 300);
        assert!(img.get_pixel(x, y).0[0] < plain.get_pixel(x, y).0[0]);
    }

    #[tokio::test]
    async fn test_jpeg_export() {
        let bytes = renderer()
            .render_jpeg(&sample(), &CustomizationState::default(), RenderMode::Download)
            .await
            .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1050, 600));
    }

    #[test]
    fn test_request_defaults() {
        let req: CardRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.mode, RenderMode::Inline);
        assert_eq!(req.customization, CustomizationState::default());

        let req: CardRequest =
            serde_json::from_str(r#"{"mode":"modal","data":{"vcard_fname":"Ada"}}"#).unwrap();
        assert_eq!(req.mode, RenderMode::Modal);
        assert_eq!(req.data.get(ContactField::FirstName), Some("Ada"));
    }
}
