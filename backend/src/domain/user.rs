//! Demo user identity and plan tiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Subscription tier gating AI analytics and the QR-code quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Plan {
    Free,
    Pro,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
            Self::Pro => f.write_str("Pro"),
        }
    }
}

/// Account status shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Plan-dependent QR-code quota.
///
/// `Unlimited` serialises as `null` so clients can render "unlimited"
/// without a sentinel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QrCodeQuota {
    /// Finite allowance on the Free plan. Informational only: no mutation
    /// enforces it.
    Limited(u32),
    /// No quota on the Pro plan.
    Unlimited,
}

/// Demo dashboard user.
///
/// ## Invariants
/// - `qr_codes_active` never goes negative: decrements are floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub status: UserStatus,
    /// Count of QR codes currently owned by this user.
    pub qr_codes_active: u32,
    pub qr_code_limit: QrCodeQuota,
}

impl User {
    /// Whether the user's plan grants access to AI analytics.
    pub const fn has_ai_access(&self) -> bool {
        matches!(self.plan, Plan::Pro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo_data;

    #[test]
    fn unlimited_quota_serialises_as_null() {
        let value = serde_json::to_value(QrCodeQuota::Unlimited).expect("serialise");
        assert!(value.is_null());
        let limited = serde_json::to_value(QrCodeQuota::Limited(10)).expect("serialise");
        assert_eq!(limited, serde_json::json!(10));
    }

    #[test]
    fn ai_access_follows_plan() {
        assert!(demo_data::pro_user().has_ai_access());
        assert!(!demo_data::free_user().has_ai_access());
    }

    #[test]
    fn user_round_trips_with_camel_case_keys() {
        let user = demo_data::free_user();
        let value = serde_json::to_value(&user).expect("serialise");
        assert!(value.get("qrCodesActive").is_some());
        assert!(value.get("qr_codes_active").is_none());
        let decoded: User = serde_json::from_value(value).expect("deserialise");
        assert_eq!(decoded, user);
    }
}
