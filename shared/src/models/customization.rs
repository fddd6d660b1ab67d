//! Card Customization Model
//!
//! Background gradients, QR patterns and per-field icons the user can pick
//! for their card. A [`CustomizationState`] always holds whole option
//! values; selecting a new option replaces the previous one outright.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `#rrggbb` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: HexColor = HexColor::from_u32(0x000000);
    pub const WHITE: HexColor = HexColor::from_u32(0xFFFFFF);

    pub const fn from_u32(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }

    pub const fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive)
    pub fn parse(s: &str) -> Result<Self, InvalidHexColor> {
        let hex = s.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(InvalidHexColor(s.to_string())),
        };
        let value =
            u32::from_str_radix(&expanded, 16).map_err(|_| InvalidHexColor(s.to_string()))?;
        Ok(Self::from_u32(value))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidHexColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

/// Error for a string that is not a hex color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0}")]
pub struct InvalidHexColor(pub String);

/// Background gradient option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundOption {
    pub id: String,
    pub name: String,
    /// Start and end color of the diagonal gradient
    pub gradient: [HexColor; 2],
}

impl BackgroundOption {
    fn new(id: &str, name: &str, from: u32, to: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            gradient: [HexColor::from_u32(from), HexColor::from_u32(to)],
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

/// Dark/light module colors of a QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrColors {
    pub dark: HexColor,
    pub light: HexColor,
}

impl Default for QrColors {
    fn default() -> Self {
        Self {
            dark: HexColor::BLACK,
            light: HexColor::WHITE,
        }
    }
}

/// Widest quiet zone a pattern may ask for, in modules
pub const MAX_QR_MARGIN: u32 = 16;

fn bounded_margin<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let margin = u32::deserialize(deserializer)?;
    if margin > MAX_QR_MARGIN {
        return Err(serde::de::Error::custom(format!(
            "QR margin {margin} exceeds {MAX_QR_MARGIN} modules"
        )));
    }
    Ok(margin)
}

/// QR code pattern option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPattern {
    pub id: String,
    pub name: String,
    #[serde(rename = "errorCorrectionLevel")]
    pub ec_level: EcLevel,
    /// Quiet zone width in modules, at most [`MAX_QR_MARGIN`]
    #[serde(deserialize_with = "bounded_margin")]
    pub margin: u32,
    /// Color override; black on white when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<QrColors>,
}

impl QrPattern {
    fn new(id: &str, name: &str, ec_level: EcLevel, margin: u32, color: Option<QrColors>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ec_level,
            margin,
            color,
        }
    }

    /// Effective dark/light colors
    pub fn colors(&self) -> QrColors {
        self.color.unwrap_or_default()
    }
}

/// Card field that can carry an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconField {
    Phone,
    Email,
    Address,
    Website,
    Company,
    Title,
}

impl IconField {
    pub const ALL: [IconField; 6] = [
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Website,
        Self::Company,
        Self::Title,
    ];
}

/// Icon option for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconOption {
    pub id: String,
    pub name: String,
    /// Text drawn in front of the field value
    pub glyph: String,
}

impl IconOption {
    fn new(id: &str, name: &str, glyph: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            glyph: glyph.to_string(),
        }
    }
}

/// Selected icon per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSet {
    pub phone: IconOption,
    pub email: IconOption,
    pub address: IconOption,
    pub website: IconOption,
    pub company: IconOption,
    pub title: IconOption,
}

impl IconSet {
    pub fn get(&self, field: IconField) -> &IconOption {
        match field {
            IconField::Phone => &self.phone,
            IconField::Email => &self.email,
            IconField::Address => &self.address,
            IconField::Website => &self.website,
            IconField::Company => &self.company,
            IconField::Title => &self.title,
        }
    }

    fn get_mut(&mut self, field: IconField) -> &mut IconOption {
        match field {
            IconField::Phone => &mut self.phone,
            IconField::Email => &mut self.email,
            IconField::Address => &mut self.address,
            IconField::Website => &mut self.website,
            IconField::Company => &mut self.company,
            IconField::Title => &mut self.title,
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        let first = |field| {
            icon_options(field)
                .into_iter()
                .next()
                .unwrap_or_else(|| IconOption::new("none", "None", ""))
        };
        Self {
            phone: first(IconField::Phone),
            email: first(IconField::Email),
            address: first(IconField::Address),
            website: first(IconField::Website),
            company: first(IconField::Company),
            title: first(IconField::Title),
        }
    }
}

/// Visual customization applied to a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizationState {
    pub background: BackgroundOption,
    pub qr_pattern: QrPattern,
    pub icons: IconSet,
}

impl Default for CustomizationState {
    fn default() -> Self {
        let catalog = CustomizationCatalog::get();
        Self {
            background: catalog
                .backgrounds
                .into_iter()
                .next()
                .unwrap_or_else(|| BackgroundOption::new("lava", "LAVA Orange", 0xff1300, 0xff5f00)),
            qr_pattern: catalog
                .qr_patterns
                .into_iter()
                .next()
                .unwrap_or_else(|| QrPattern::new("classic", "Classic", EcLevel::M, 1, None)),
            icons: IconSet::default(),
        }
    }
}

impl CustomizationState {
    pub fn with_background(mut self, background: BackgroundOption) -> Self {
        self.background = background;
        self
    }

    pub fn with_qr_pattern(mut self, pattern: QrPattern) -> Self {
        self.qr_pattern = pattern;
        self
    }

    pub fn with_icon(mut self, field: IconField, icon: IconOption) -> Self {
        *self.icons.get_mut(field) = icon;
        self
    }
}

/// All selectable options, as served to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationCatalog {
    pub backgrounds: Vec<BackgroundOption>,
    pub qr_patterns: Vec<QrPattern>,
    pub icons: Vec<IconChoices>,
}

/// Icon options offered for one field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconChoices {
    pub field: IconField,
    pub options: Vec<IconOption>,
}

impl CustomizationCatalog {
    pub fn get() -> Self {
        Self {
            backgrounds: background_options(),
            qr_patterns: qr_patterns(),
            icons: IconField::ALL
                .into_iter()
                .map(|field| IconChoices {
                    field,
                    options: icon_options(field),
                })
                .collect(),
        }
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundOption> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    pub fn qr_pattern(&self, id: &str) -> Option<&QrPattern> {
        self.qr_patterns.iter().find(|p| p.id == id)
    }
}

pub fn background_options() -> Vec<BackgroundOption> {
    vec![
        BackgroundOption::new("lava", "LAVA Orange", 0xff1300, 0xff5f00),
        BackgroundOption::new("ocean", "Ocean Blue", 0x667eea, 0x764ba2),
        BackgroundOption::new("sunset", "Sunset", 0xf093fb, 0xf5576c),
        BackgroundOption::new("forest", "Forest", 0x134e5e, 0x71b280),
        BackgroundOption::new("purple", "Royal Purple", 0x667eea, 0x764ba2),
        BackgroundOption::new("golden", "Golden Hour", 0xf7971e, 0xffd200),
        BackgroundOption::new("midnight", "Midnight", 0x2c3e50, 0x4a6741),
        BackgroundOption::new("rose", "Rose Gold", 0xf953c6, 0xb91d73),
    ]
}

pub fn qr_patterns() -> Vec<QrPattern> {
    vec![
        QrPattern::new("classic", "Classic", EcLevel::M, 1, None),
        QrPattern::new(
            "high-contrast",
            "High Contrast",
            EcLevel::H,
            2,
            Some(QrColors {
                dark: HexColor::BLACK,
                light: HexColor::WHITE,
            }),
        ),
        QrPattern::new("compact", "Compact", EcLevel::L, 0, None),
        QrPattern::new("robust", "Robust", EcLevel::Q, 3, None),
    ]
}

/// Icon options for a field; the first one is the default.
///
/// Emoji variants need a color emoji font and are left out of raster output
/// by the bundled fonts.
pub fn icon_options(field: IconField) -> Vec<IconOption> {
    match field {
        IconField::Phone => vec![
            IconOption::new("phone-classic", "Telephone", "☎"),
            IconOption::new("phone-mobile", "Mobile", "✆"),
            IconOption::new("phone-emoji", "Emoji", "📞"),
        ],
        IconField::Email => vec![
            IconOption::new("email-envelope", "Envelope", "✉"),
            IconOption::new("email-pen", "Pen", "✎"),
            IconOption::new("email-emoji", "Emoji", "📧"),
        ],
        IconField::Address => vec![
            IconOption::new("address-building", "Building", "⌂"),
            IconOption::new("address-flag", "Flag", "⚑"),
            IconOption::new("address-emoji", "Emoji", "📍"),
        ],
        IconField::Website => vec![
            IconOption::new("website-arrow", "Arrow", "➜"),
            IconOption::new("website-globe", "Globe", "⊕"),
            IconOption::new("website-emoji", "Emoji", "🌐"),
        ],
        IconField::Company => vec![
            IconOption::new("company-diamond", "Diamond", "◆"),
            IconOption::new("company-gear", "Gear", "⚙"),
            IconOption::new("company-emoji", "Emoji", "🏢"),
        ],
        IconField::Title => vec![
            IconOption::new("title-star", "Star", "★"),
            IconOption::new("title-badge", "Badge", "✪"),
            IconOption::new("title-emoji", "Emoji", "💼"),
        ],
    }
}
