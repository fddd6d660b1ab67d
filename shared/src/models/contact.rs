//! Contact Model
//!
//! The business-card form state. Wire names follow the form field names
//! used by the frontend (`vcard_fname`, `con_email`, `wrk_URL`, ...).

use serde::{Deserialize, Serialize};

use crate::util::{collapse_whitespace, non_blank};

/// Contact data edited in the card form
///
/// Every text field is optional; the persistence layer enforces the
/// required ones. The renderer never mutates this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactData {
    // Full name
    pub vcard_fname: Option<String>,
    pub vcard_mname: Option<String>,
    pub vcard_lname: Option<String>,
    /// References `suffixes.id`
    pub vcard_suffix: Option<i64>,

    // Contact
    pub con_email: Option<String>,
    pub con_phone: Option<String>,

    // Images: stored URL (`/api/image/{file}`), remote URL or `data:` URI
    pub img_photo: Option<String>,
    pub img_logo: Option<String>,

    // Social links
    pub soc_linkedin: Option<String>,
    pub soc_twitter: Option<String>,
    pub soc_facebook: Option<String>,
    pub soc_instagram: Option<String>,
    pub soc_youtube: Option<String>,
    pub soc_customlink: Option<String>,

    // Work
    pub wrk_org: Option<String>,
    pub wkr_email: Option<String>,
    pub wrk_title: Option<String>,
    pub wrk_role: Option<String>,
    #[serde(rename = "wrk_URL")]
    pub wrk_url: Option<String>,

    // Work address
    pub wa_street: Option<String>,
    pub wa_city: Option<String>,
    pub wa_state: Option<String>,
    pub wa_postal_code: Option<String>,
    pub wa_country: Option<String>,
}

/// Text fields of [`ContactData`], one variant per form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactField {
    #[serde(rename = "vcard_fname")]
    FirstName,
    #[serde(rename = "vcard_mname")]
    MiddleName,
    #[serde(rename = "vcard_lname")]
    LastName,
    #[serde(rename = "con_email")]
    Email,
    #[serde(rename = "con_phone")]
    Phone,
    #[serde(rename = "img_photo")]
    Photo,
    #[serde(rename = "img_logo")]
    Logo,
    #[serde(rename = "soc_linkedin")]
    Linkedin,
    #[serde(rename = "soc_twitter")]
    Twitter,
    #[serde(rename = "soc_facebook")]
    Facebook,
    #[serde(rename = "soc_instagram")]
    Instagram,
    #[serde(rename = "soc_youtube")]
    Youtube,
    #[serde(rename = "soc_customlink")]
    CustomLink,
    #[serde(rename = "wrk_org")]
    Organization,
    #[serde(rename = "wkr_email")]
    WorkEmail,
    #[serde(rename = "wrk_title")]
    Title,
    #[serde(rename = "wrk_role")]
    Role,
    #[serde(rename = "wrk_URL")]
    Website,
    #[serde(rename = "wa_street")]
    Street,
    #[serde(rename = "wa_city")]
    City,
    #[serde(rename = "wa_state")]
    State,
    #[serde(rename = "wa_postal_code")]
    PostalCode,
    #[serde(rename = "wa_country")]
    Country,
}

impl ContactField {
    pub const ALL: [ContactField; 23] = [
        Self::FirstName,
        Self::MiddleName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Photo,
        Self::Logo,
        Self::Linkedin,
        Self::Twitter,
        Self::Facebook,
        Self::Instagram,
        Self::Youtube,
        Self::CustomLink,
        Self::Organization,
        Self::WorkEmail,
        Self::Title,
        Self::Role,
        Self::Website,
        Self::Street,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::Country,
    ];

    pub const ADDRESS: [ContactField; 5] = [
        Self::Street,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::Country,
    ];

    /// Form field name as sent over the wire
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "vcard_fname",
            Self::MiddleName => "vcard_mname",
            Self::LastName => "vcard_lname",
            Self::Email => "con_email",
            Self::Phone => "con_phone",
            Self::Photo => "img_photo",
            Self::Logo => "img_logo",
            Self::Linkedin => "soc_linkedin",
            Self::Twitter => "soc_twitter",
            Self::Facebook => "soc_facebook",
            Self::Instagram => "soc_instagram",
            Self::Youtube => "soc_youtube",
            Self::CustomLink => "soc_customlink",
            Self::Organization => "wrk_org",
            Self::WorkEmail => "wkr_email",
            Self::Title => "wrk_title",
            Self::Role => "wrk_role",
            Self::Website => "wrk_URL",
            Self::Street => "wa_street",
            Self::City => "wa_city",
            Self::State => "wa_state",
            Self::PostalCode => "wa_postal_code",
            Self::Country => "wa_country",
        }
    }
}

impl ContactData {
    fn slot(&self, field: ContactField) -> &Option<String> {
        match field {
            ContactField::FirstName => &self.vcard_fname,
            ContactField::MiddleName => &self.vcard_mname,
            ContactField::LastName => &self.vcard_lname,
            ContactField::Email => &self.con_email,
            ContactField::Phone => &self.con_phone,
            ContactField::Photo => &self.img_photo,
            ContactField::Logo => &self.img_logo,
            ContactField::Linkedin => &self.soc_linkedin,
            ContactField::Twitter => &self.soc_twitter,
            ContactField::Facebook => &self.soc_facebook,
            ContactField::Instagram => &self.soc_instagram,
            ContactField::Youtube => &self.soc_youtube,
            ContactField::CustomLink => &self.soc_customlink,
            ContactField::Organization => &self.wrk_org,
            ContactField::WorkEmail => &self.wkr_email,
            ContactField::Title => &self.wrk_title,
            ContactField::Role => &self.wrk_role,
            ContactField::Website => &self.wrk_url,
            ContactField::Street => &self.wa_street,
            ContactField::City => &self.wa_city,
            ContactField::State => &self.wa_state,
            ContactField::PostalCode => &self.wa_postal_code,
            ContactField::Country => &self.wa_country,
        }
    }

    fn slot_mut(&mut self, field: ContactField) -> &mut Option<String> {
        match field {
            ContactField::FirstName => &mut self.vcard_fname,
            ContactField::MiddleName => &mut self.vcard_mname,
            ContactField::LastName => &mut self.vcard_lname,
            ContactField::Email => &mut self.con_email,
            ContactField::Phone => &mut self.con_phone,
            ContactField::Photo => &mut self.img_photo,
            ContactField::Logo => &mut self.img_logo,
            ContactField::Linkedin => &mut self.soc_linkedin,
            ContactField::Twitter => &mut self.soc_twitter,
            ContactField::Facebook => &mut self.soc_facebook,
            ContactField::Instagram => &mut self.soc_instagram,
            ContactField::Youtube => &mut self.soc_youtube,
            ContactField::CustomLink => &mut self.soc_customlink,
            ContactField::Organization => &mut self.wrk_org,
            ContactField::WorkEmail => &mut self.wkr_email,
            ContactField::Title => &mut self.wrk_title,
            ContactField::Role => &mut self.wrk_role,
            ContactField::Website => &mut self.wrk_url,
            ContactField::Street => &mut self.wa_street,
            ContactField::City => &mut self.wa_city,
            ContactField::State => &mut self.wa_state,
            ContactField::PostalCode => &mut self.wa_postal_code,
            ContactField::Country => &mut self.wa_country,
        }
    }

    /// Raw field value, including blank strings
    pub fn raw(&self, field: ContactField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Field value when it has visible content
    pub fn get(&self, field: ContactField) -> Option<&str> {
        non_blank(self.slot(field))
    }

    /// Return a copy with one field replaced; an empty value clears it
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        let value = value.into();
        *self.slot_mut(field) = if value.is_empty() { None } else { Some(value) };
        self
    }

    /// Return a copy with the suffix replaced
    pub fn with_suffix(mut self, suffix: Option<i64>) -> Self {
        self.vcard_suffix = suffix;
        self
    }

    /// First, middle and last name joined with single spaces
    pub fn full_name(&self) -> String {
        let joined = [
            self.raw(ContactField::FirstName).unwrap_or_default(),
            self.raw(ContactField::MiddleName).unwrap_or_default(),
            self.raw(ContactField::LastName).unwrap_or_default(),
        ]
        .join(" ");
        collapse_whitespace(&joined)
    }

    /// Work email, unless it repeats the personal email
    pub fn distinct_work_email(&self) -> Option<&str> {
        let work = self.get(ContactField::WorkEmail)?;
        if self.raw(ContactField::Email) == Some(work) {
            return None;
        }
        Some(work)
    }

    /// Whether any work address field carries content
    pub fn has_work_address(&self) -> bool {
        ContactField::ADDRESS
            .iter()
            .any(|f| self.get(*f).is_some())
    }

    /// Social links in display order, labelled
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("linkedin", ContactField::Linkedin),
            ("twitter", ContactField::Twitter),
            ("facebook", ContactField::Facebook),
            ("instagram", ContactField::Instagram),
            ("youtube", ContactField::Youtube),
            ("custom", ContactField::CustomLink),
        ]
        .into_iter()
        .filter_map(|(label, f)| self.get(f).map(|v| (label, v)))
        .collect()
    }
}

/// Stored card as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VCardRecord {
    pub vcard_id: i64,
    /// Creation time in unix millis
    pub created_at: i64,
    #[serde(flatten)]
    pub contact: ContactData,
}
