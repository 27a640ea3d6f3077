//! QR-code entity, content types, and design sub-record.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Stable QR-code identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct QrCodeId(Uuid);

impl QrCodeId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for QrCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Content type encoded by a QR code.
///
/// Wire names match the product vocabulary, including the hyphenated
/// `Link-in-bio` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum QrCodeType {
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "vCard")]
    VCard,
    WiFi,
    WhatsApp,
    Email,
    #[serde(rename = "SMS")]
    Sms,
    Location,
    Event,
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Link-in-bio")]
    LinkInBio,
}

impl QrCodeType {
    /// All content types in presentation order.
    pub const ALL: [Self; 10] = [
        Self::Url,
        Self::VCard,
        Self::WiFi,
        Self::WhatsApp,
        Self::Email,
        Self::Sms,
        Self::Location,
        Self::Event,
        Self::Pdf,
        Self::LinkInBio,
    ];
}

impl fmt::Display for QrCodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Url => "URL",
            Self::VCard => "vCard",
            Self::WiFi => "WiFi",
            Self::WhatsApp => "WhatsApp",
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::Location => "Location",
            Self::Event => "Event",
            Self::Pdf => "PDF",
            Self::LinkInBio => "Link-in-bio",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing a [`QrCodeType`] from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseQrCodeTypeError;

impl fmt::Display for ParseQrCodeTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown QR code content type")
    }
}

impl std::error::Error for ParseQrCodeTypeError {}

impl FromStr for QrCodeType {
    type Err = ParseQrCodeTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "URL" => Ok(Self::Url),
            "vCard" => Ok(Self::VCard),
            "WiFi" => Ok(Self::WiFi),
            "WhatsApp" => Ok(Self::WhatsApp),
            "Email" => Ok(Self::Email),
            "SMS" => Ok(Self::Sms),
            "Location" => Ok(Self::Location),
            "Event" => Ok(Self::Event),
            "PDF" => Ok(Self::Pdf),
            "Link-in-bio" => Ok(Self::LinkInBio),
            _ => Err(ParseQrCodeTypeError),
        }
    }
}

/// Validation error for [`HexColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColorError;

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("colour must be a hex string like #1A2B3C")
    }
}

impl std::error::Error for HexColorError {}

static HEX_COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_RE.get_or_init(|| {
        Regex::new("^#[0-9A-Fa-f]{6}$")
            .unwrap_or_else(|error| panic!("hex colour regex failed to compile: {error}"))
    })
}

/// `#RRGGBB` colour used by the design sub-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "#000000")]
pub struct HexColor(String);

impl HexColor {
    /// Validate and construct a colour.
    pub fn new(value: impl Into<String>) -> Result<Self, HexColorError> {
        let raw = value.into();
        if hex_color_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(HexColorError)
        }
    }

    /// The colour with its leading `#`, as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The six hex digits without the leading `#`, as image services expect.
    pub fn without_hash(&self) -> &str {
        self.0.trim_start_matches('#')
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual design of a rendered QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrDesign {
    pub foreground_color: HexColor,
    pub background_color: HexColor,
    /// Optional logo reference overlaid on the rendered image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for QrDesign {
    /// Black modules on a white background, no logo.
    fn default() -> Self {
        Self {
            foreground_color: HexColor("#000000".to_string()),
            background_color: HexColor("#FFFFFF".to_string()),
            logo: None,
        }
    }
}

/// A QR code owned by the demo user.
///
/// ## Invariants
/// - `scan_count` only ever increments, one scan at a time.
/// - Campaign membership is not stored here; the owning
///   [`Campaign`](super::campaign::Campaign) keeps the authoritative list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: QrCodeId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub qr_type: QrCodeType,
    /// Tracking URL through the redirect layer.
    pub short_url: String,
    /// Redirect target actually encoded.
    pub destination_url: String,
    /// Whether the destination can change after printing.
    pub dynamic: bool,
    pub tags: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub scan_count: u64,
    pub design: QrDesign,
}
