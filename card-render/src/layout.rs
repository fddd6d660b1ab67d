//! Card layout
//!
//! [`compose`] decides where everything goes. It never touches pixels, and
//! every length it emits is a base constant multiplied by the mode's scale.

use shared::models::{ContactData, ContactField, CustomizationState, HexColor, IconField};

use crate::mode::RenderMode;
use crate::scene::{Clip, ImageSlot, Rect, Scene, SceneBuilder, TextAlign, TextStyle};
use crate::text::{address_line, role_line, strip_scheme, truncate_with_ellipsis};

// Base geometry (inline mode pixels)
const CARD_PADDING: f32 = 16.0;
const CARD_RADIUS: f32 = 8.0;
const IMAGE_MARGIN: f32 = 8.0;
const PHOTO_SIZE: f32 = 50.0;
const LOGO_SIZE: f32 = 40.0;
const LOGO_RADIUS: f32 = 4.0;
const TEXT_X: f32 = 80.0;
const NAME_OFFSET: f32 = 20.0;
const NAME_SIZE: f32 = 16.0;
const NAME_ADVANCE: f32 = 22.0;
const ROLE_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 18.0;
const CONTACT_SIZE: f32 = 9.0;
const ADDRESS_SIZE: f32 = 8.0;
const QR_SIZE: f32 = 60.0;
const QR_CAPTION_ROOM: f32 = 20.0;
const CAPTION_SIZE: f32 = 6.0;
const CAPTION_OFFSET: f32 = 10.0;
const URL_SIZE: f32 = 5.0;
const URL_OFFSET: f32 = 18.0;
const SHADOW_BLUR: f32 = 4.0;
const SHADOW_OFFSET: f32 = 2.0;
const SHADOW_COLOR: [u8; 4] = [0, 0, 0, 26];

const CARD_FILL: HexColor = HexColor::WHITE;
const NAME_COLOR: HexColor = HexColor::from_u32(0x2c3e50);
const PLACEHOLDER_COLOR: HexColor = HexColor::from_u32(0xcccccc);
const ROLE_COLOR: HexColor = HexColor::from_u32(0x7f8c8d);
const CONTACT_COLOR: HexColor = HexColor::from_u32(0x34495e);
const CAPTION_COLOR: HexColor = HexColor::from_u32(0xff1300);
const URL_COLOR: HexColor = HexColor::from_u32(0x666666);

/// Shown when every name part is blank
pub const NAME_PLACEHOLDER: &str = "Your Name Here";

/// Which bitmaps resolved before layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slots {
    pub photo: bool,
    pub logo: bool,
    pub qr: bool,
}

/// Lay out a card
pub fn compose(
    data: &ContactData,
    customization: &CustomizationState,
    mode: RenderMode,
    slots: Slots,
) -> Scene {
    let (width, height) = mode.dimensions();
    let s = mode.scale();
    let mut scene = SceneBuilder::new(width, height, s);

    let [from, to] = customization.background.gradient;
    scene.gradient(from, to);

    let card = Rect::new(
        CARD_PADDING * s,
        CARD_PADDING * s,
        width as f32 - 2.0 * CARD_PADDING * s,
        height as f32 - 2.0 * CARD_PADDING * s,
    );
    if mode.has_shadow() {
        scene.shadow(
            card,
            CARD_RADIUS * s,
            SHADOW_BLUR * s,
            (SHADOW_OFFSET * s, SHADOW_OFFSET * s),
            SHADOW_COLOR,
        );
    }
    scene.rounded_rect(card, CARD_RADIUS * s, CARD_FILL);

    let margin = IMAGE_MARGIN * s;
    if slots.photo {
        let size = PHOTO_SIZE * s;
        scene.image(
            ImageSlot::Photo,
            Rect::new(card.x + margin, card.y + margin, size, size),
            Clip::Circle,
        );
    }
    if slots.logo {
        let size = LOGO_SIZE * s;
        scene.image(
            ImageSlot::Logo,
            Rect::new(card.right() - size - margin, card.y + margin, size, size),
            Clip::RoundedRect {
                radius: LOGO_RADIUS * s,
            },
        );
    }

    let icons = &customization.icons;
    let style = |size: f32, bold: bool, color: HexColor| TextStyle {
        size: size * s,
        bold,
        color,
        align: TextAlign::Left,
    };
    let x = TEXT_X * s;
    let mut y = card.y + margin + NAME_OFFSET * s;

    let name = data.full_name();
    if name.is_empty() {
        scene.text(NAME_PLACEHOLDER, x, y, style(NAME_SIZE, true, PLACEHOLDER_COLOR));
    } else {
        scene.text(name, x, y, style(NAME_SIZE, true, NAME_COLOR));
    }
    y += NAME_ADVANCE * s;

    if let Some(line) = role_line(data) {
        scene.text(line, x, y, style(ROLE_SIZE, false, ROLE_COLOR));
        y += LINE_HEIGHT * s;
    }

    let contact_lines = [
        (IconField::Phone, data.get(ContactField::Phone)),
        (IconField::Email, data.get(ContactField::Email)),
        (IconField::Email, data.distinct_work_email()),
    ];
    for (icon, value) in contact_lines {
        if let Some(value) = value {
            let line = format!("{} {value}", icons.get(icon).glyph);
            scene.text(line, x, y, style(CONTACT_SIZE, false, CONTACT_COLOR));
            y += LINE_HEIGHT * s;
        }
    }

    if let Some(address) = address_line(data) {
        let short = truncate_with_ellipsis(&address, mode.address_budget());
        let line = format!("{} {short}", icons.get(IconField::Address).glyph);
        scene.text(line, x, y, style(ADDRESS_SIZE, false, CONTACT_COLOR));
    }

    if slots.qr
        && let Some(url) = data.get(ContactField::Website)
    {
        let size = QR_SIZE * s;
        let qr = Rect::new(
            card.right() - size - margin,
            card.bottom() - size - margin - QR_CAPTION_ROOM * s,
            size,
            size,
        );
        scene.image(ImageSlot::Qr, qr, Clip::None);

        let center = qr.x + size / 2.0;
        let centered = |size: f32, bold: bool, color: HexColor| TextStyle {
            size: size * s,
            bold,
            color,
            align: TextAlign::Center,
        };
        let caption = format!("{} Visit Website", icons.get(IconField::Website).glyph);
        scene.text(
            caption,
            center,
            qr.bottom() + CAPTION_OFFSET * s,
            centered(CAPTION_SIZE, true, CAPTION_COLOR),
        );
        scene.text(
            truncate_with_ellipsis(strip_scheme(url), mode.url_budget()),
            center,
            qr.bottom() + URL_OFFSET * s,
            centered(URL_SIZE, false, URL_COLOR),
        );
    }

    scene.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawOp;

    const ALL_SLOTS: Slots = Slots {
        photo: true,
        logo: true,
        qr: true,
    };

    fn sample() -> ContactData {
        ContactData::default()
            .with(ContactField::FirstName, "Ada")
            .with(ContactField::MiddleName, " ")
            .with(ContactField::LastName, "Lovelace")
            .with(ContactField::Role, "Engineer")
            .with(ContactField::Organization, "LAVA")
            .with(ContactField::Phone, "+1 555 0100")
            .with(ContactField::Email, "ada@example.com")
            .with(ContactField::WorkEmail, "ada@lava.example")
            .with(ContactField::City, "London")
            .with(ContactField::Website, "https://lava.example/cards")
    }

    fn text_op<'a>(scene: &'a Scene, needle: &str) -> Option<&'a DrawOp> {
        scene
            .ops
            .iter()
            .find(|op| op.text().is_some_and(|t| t.contains(needle)))
    }

    #[test]
    fn test_text_order() {
        let scene = compose(
            &sample(),
            &CustomizationState::default(),
            RenderMode::Inline,
            ALL_SLOTS,
        );
        let texts: Vec<&str> = scene.texts().collect();
        assert_eq!(texts[0], "Ada Lovelace");
        assert_eq!(texts[1], "Engineer at LAVA");
        assert_eq!(texts[2], "☎ +1 555 0100");
        assert_eq!(texts[3], "✉ ada@example.com");
        assert_eq!(texts[4], "✉ ada@lava.example");
        assert_eq!(texts[5], "⌂ London");
        assert_eq!(texts[6], "➜ Visit Website");
        assert_eq!(texts[7], "lava.example/cards");
    }

    #[test]
    fn test_cursor_advances() {
        let scene = compose(
            &sample(),
            &CustomizationState::default(),
            RenderMode::Inline,
            Slots::default(),
        );
        let ys: Vec<f32> = scene
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![44.0, 66.0, 84.0, 102.0, 120.0, 138.0]);
    }

    #[test]
    fn test_placeholder_name() {
        let scene = compose(
            &ContactData::default(),
            &CustomizationState::default(),
            RenderMode::Modal,
            Slots::default(),
        );
        match text_op(&scene, NAME_PLACEHOLDER) {
            Some(DrawOp::Text { style, .. }) => {
                assert_eq!(style.color, PLACEHOLDER_COLOR);
                assert!(style.bold);
            }
            other => panic!("placeholder missing: {other:?}"),
        }
    }

    #[test]
    fn test_work_email_suppressed_when_equal() {
        let data = sample().with(ContactField::WorkEmail, "ada@example.com");
        let scene = compose(
            &data,
            &CustomizationState::default(),
            RenderMode::Inline,
            Slots::default(),
        );
        let emails = scene.texts().filter(|t| t.contains("ada@")).count();
        assert_eq!(emails, 1);
    }

    #[test]
    fn test_address_truncation_modal() {
        let exact = "a".repeat(55);
        let data = ContactData::default().with(ContactField::Street, exact.clone());
        let scene = compose(
            &data,
            &CustomizationState::default(),
            RenderMode::Modal,
            Slots::default(),
        );
        assert!(scene.texts().any(|t| t == format!("⌂ {exact}")));

        let long = "b".repeat(65);
        let data = ContactData::default().with(ContactField::Street, long);
        let scene = compose(
            &data,
            &CustomizationState::default(),
            RenderMode::Modal,
            Slots::default(),
        );
        let expected = format!("⌂ {}...", "b".repeat(57));
        assert!(scene.texts().any(|t| t == expected));
    }

    #[test]
    fn test_qr_omitted_without_website() {
        let data = sample().with(ContactField::Website, "");
        let scene = compose(&data, &CustomizationState::default(), RenderMode::Download, ALL_SLOTS);
        assert_eq!(scene.images(ImageSlot::Qr).count(), 0);
        assert!(text_op(&scene, "Visit Website").is_none());
        assert!(text_op(&scene, "lava.example/cards").is_none());
    }

    #[test]
    fn test_qr_omitted_when_generation_failed() {
        let slots = Slots {
            qr: false,
            ..ALL_SLOTS
        };
        let scene = compose(&sample(), &CustomizationState::default(), RenderMode::Inline, slots);
        assert_eq!(scene.images(ImageSlot::Qr).count(), 0);
        assert!(text_op(&scene, "Visit Website").is_none());
        // Rest of the card is intact
        assert_eq!(scene.images(ImageSlot::Photo).count(), 1);
    }

    #[test]
    fn test_url_budget_per_mode() {
        let data = sample().with(
            ContactField::Website,
            "https://example.com/a/very/long/path/that/keeps/going/and/going",
        );
        let scene = compose(&data, &CustomizationState::default(), RenderMode::Inline, ALL_SLOTS);
        let url = scene.texts().last().unwrap();
        assert_eq!(url, "example.com/a/ver...");
    }

    #[test]
    fn test_shadow_only_in_download() {
        for mode in RenderMode::ALL {
            let scene = compose(&sample(), &CustomizationState::default(), mode, ALL_SLOTS);
            assert_eq!(scene.has_shadow(), mode == RenderMode::Download);
        }
    }

    #[test]
    fn test_image_anchors_inline() {
        let scene = compose(&sample(), &CustomizationState::default(), RenderMode::Inline, ALL_SLOTS);
        let rect_of = |slot| match scene.images(slot).next() {
            Some(DrawOp::Image { rect, .. }) => *rect,
            other => panic!("missing image: {other:?}"),
        };
        assert_eq!(rect_of(ImageSlot::Photo), Rect::new(24.0, 24.0, 50.0, 50.0));
        assert_eq!(rect_of(ImageSlot::Logo), Rect::new(356.0, 24.0, 40.0, 40.0));
        assert_eq!(rect_of(ImageSlot::Qr), Rect::new(336.0, 136.0, 60.0, 60.0));
    }

    #[test]
    fn test_geometric_similarity() {
        let data = sample().with(ContactField::Street, "12 Long Street Name That Goes On");
        let custom = CustomizationState::default();
        let base = compose(&data, &custom, RenderMode::Inline, ALL_SLOTS);

        for mode in [RenderMode::Modal, RenderMode::Download] {
            let scene = compose(&data, &custom, mode, ALL_SLOTS).normalized();
            assert_eq!((scene.width, scene.height), (base.width, base.height));

            // Shadow is download-only
            let ops: Vec<&DrawOp> = scene
                .ops
                .iter()
                .filter(|op| !matches!(op, DrawOp::Shadow { .. }))
                .collect();
            assert_eq!(ops.len(), base.ops.len());
            for (a, b) in base.ops.iter().zip(ops) {
                assert_ops_close(a, b);
            }
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn rect_close(a: &Rect, b: &Rect) -> bool {
        close(a.x, b.x) && close(a.y, b.y) && close(a.w, b.w) && close(a.h, b.h)
    }

    fn assert_ops_close(a: &DrawOp, b: &DrawOp) {
        let ok = match (a, b) {
            (
                DrawOp::LinearGradient { end: e1, .. },
                DrawOp::LinearGradient { end: e2, .. },
            ) => close(e1.0, e2.0) && close(e1.1, e2.1),
            (
                DrawOp::RoundedRect {
                    rect: r1,
                    radius: k1,
                    ..
                },
                DrawOp::RoundedRect {
                    rect: r2,
                    radius: k2,
                    ..
                },
            ) => rect_close(r1, r2) && close(*k1, *k2),
            (
                DrawOp::Image {
                    slot: s1, rect: r1, ..
                },
                DrawOp::Image {
                    slot: s2, rect: r2, ..
                },
            ) => s1 == s2 && rect_close(r1, r2),
            (
                DrawOp::Text {
                    x: x1,
                    y: y1,
                    style: t1,
                    ..
                },
                DrawOp::Text {
                    x: x2,
                    y: y2,
                    style: t2,
                    ..
                },
            ) => close(*x1, *x2) && close(*y1, *y2) && close(t1.size, t2.size),
            _ => false,
        };
        assert!(ok, "ops differ after normalization: {a:?} vs {b:?}");
    }
}
