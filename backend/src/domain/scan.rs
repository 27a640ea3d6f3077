//! Immutable scan records and the simulated-dimension catalogs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::qr_code::QrCodeId;

/// Country reported by every simulated scan.
pub const SCAN_COUNTRY: &str = "Brasil";

/// Cities a simulated scan may report.
pub const SCAN_CITIES: [&str; 5] = [
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Salvador",
    "Curitiba",
];

/// Device classes a simulated scan may report.
pub const SCAN_DEVICES: [&str; 2] = ["Mobile", "Desktop"];

/// Operating systems a simulated scan may report.
pub const SCAN_OSES: [&str; 4] = ["Android", "iOS", "Windows", "MacOS"];

/// Browsers a simulated scan may report.
pub const SCAN_BROWSERS: [&str; 4] = ["Chrome", "Safari", "Firefox", "Edge"];

/// Stable scan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ScanId(Uuid);

impl ScanId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One recorded resolution of a QR code.
///
/// Scans are append-only: once created they are never edited or deleted,
/// and the owning collection keeps them most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: ScanId,
    pub qr_id: QrCodeId,
    pub timestamp: DateTime<Utc>,
    pub country: String,
    pub city: String,
    pub device: String,
    pub os: String,
    pub browser: String,
}
