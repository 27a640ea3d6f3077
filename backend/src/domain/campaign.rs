//! Campaign grouping of QR codes.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::qr_code::QrCodeId;
use super::user::UserId;

/// Stable campaign identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CampaignId(Uuid);

impl CampaignId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-defined grouping of QR codes for aggregate tracking.
///
/// ## Invariants
/// - `qr_code_ids` is the single source of truth for membership; a QR code
///   appears in at most one campaign across the whole collection. The
///   [`Workspace`](super::workspace::Workspace) maintains this on every
///   mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub user_id: UserId,
    pub name: String,
    /// Member QR codes in insertion order.
    pub qr_code_ids: Vec<QrCodeId>,
}

impl Campaign {
    /// Whether the given QR code belongs to this campaign.
    pub fn contains(&self, id: QrCodeId) -> bool {
        self.qr_code_ids.contains(&id)
    }
}
