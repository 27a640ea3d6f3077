//! Seed fixtures for the single-user demo workspace.
//!
//! Identifiers are fixed constants so restarting the process yields the
//! same entity ids; only the seeded scan timestamps vary with the RNG seed.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::rngs::SmallRng;
use uuid::Uuid;

use super::campaign::{Campaign, CampaignId};
use super::qr_code::{QrCode, QrCodeId, QrCodeType, QrDesign};
use super::scan::{
    SCAN_BROWSERS, SCAN_CITIES, SCAN_COUNTRY, SCAN_DEVICES, SCAN_OSES, Scan, ScanId,
};
use super::user::{Plan, QrCodeQuota, User, UserId, UserStatus};

const FREE_USER_ID: Uuid = Uuid::from_u128(0x11);
const PRO_USER_ID: Uuid = Uuid::from_u128(0x12);
const SEED_QR_ID: Uuid = Uuid::from_u128(0x21);
const SEED_CAMPAIGN_ID: Uuid = Uuid::from_u128(0x31);

/// Number of scans seeded against the demo QR code.
pub const SEED_SCAN_COUNT: usize = 50;

/// The demo account on the free plan.
pub fn free_user() -> User {
    User {
        id: UserId::from_uuid(FREE_USER_ID),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        plan: Plan::Free,
        status: UserStatus::Active,
        qr_codes_active: 1,
        qr_code_limit: QrCodeQuota::Limited(10),
    }
}

/// The demo account on the pro plan.
pub fn pro_user() -> User {
    User {
        id: UserId::from_uuid(PRO_USER_ID),
        name: "Alan Turing".to_string(),
        email: "alan@example.com".to_string(),
        plan: Plan::Pro,
        status: UserStatus::Active,
        qr_codes_active: 1,
        qr_code_limit: QrCodeQuota::Unlimited,
    }
}

/// Identifier of the seeded QR code.
pub fn seed_qr_id() -> QrCodeId {
    QrCodeId::from_uuid(SEED_QR_ID)
}

/// The one QR code every fresh workspace starts with.
pub fn seed_qr_code(owner: UserId) -> QrCode {
    QrCode {
        id: seed_qr_id(),
        user_id: owner,
        name: "Website Principal (Exemplo)".to_string(),
        qr_type: QrCodeType::Url,
        short_url: "https://qrsns.io/a1b2c3d4".to_string(),
        destination_url: "https://mybusiness.com".to_string(),
        dynamic: true,
        tags: vec!["marketing".to_string(), "website".to_string()],
        active: true,
        created_at: "2023-10-01T10:00:00Z"
            .parse()
            .unwrap_or_else(|error| panic!("seed timestamp failed to parse: {error}")),
        scan_count: SEED_SCAN_COUNT as u64,
        design: QrDesign::default(),
    }
}

/// The campaign the seeded QR code belongs to.
pub fn seed_campaign(owner: UserId) -> Campaign {
    Campaign {
        id: CampaignId::from_uuid(SEED_CAMPAIGN_ID),
        user_id: owner,
        name: "Lançamento de Verão".to_string(),
        qr_code_ids: vec![seed_qr_id()],
    }
}

/// Seed scans for the demo QR code, most recent first.
///
/// Dimensions cycle through a fixed prefix of each catalog; timestamps are
/// drawn from the trailing 30 days so the dashboard charts have spread.
pub fn seed_scans(now: DateTime<Utc>, rng: &mut SmallRng) -> Vec<Scan> {
    let mut scans: Vec<Scan> = (0..SEED_SCAN_COUNT)
        .map(|i| {
            let minutes_back = rng.gen_range(0..30 * 24 * 60);
            Scan {
                id: ScanId::random(),
                qr_id: seed_qr_id(),
                timestamp: now - Duration::minutes(minutes_back),
                country: SCAN_COUNTRY.to_string(),
                city: SCAN_CITIES[i % 4].to_string(),
                device: SCAN_DEVICES[i % 2].to_string(),
                os: SCAN_OSES[i % 3].to_string(),
                browser: SCAN_BROWSERS[i % 3].to_string(),
            }
        })
        .collect();
    scans.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    scans
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seed_scans_are_newest_first_and_within_the_window() {
        let now = Utc::now();
        let mut rng = SmallRng::seed_from_u64(7);
        let scans = seed_scans(now, &mut rng);

        assert_eq!(scans.len(), SEED_SCAN_COUNT);
        assert!(
            scans
                .windows(2)
                .all(|pair| pair[0].timestamp >= pair[1].timestamp)
        );
        assert!(
            scans
                .iter()
                .all(|scan| scan.timestamp > now - Duration::days(30) && scan.timestamp <= now)
        );
    }

    #[test]
    fn seed_scans_are_deterministic_for_a_seed() {
        let now = Utc::now();
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        let timestamps_a: Vec<_> = seed_scans(now, &mut a).iter().map(|s| s.timestamp).collect();
        let timestamps_b: Vec<_> = seed_scans(now, &mut b).iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps_a, timestamps_b);
    }

    #[test]
    fn seed_campaign_contains_the_seed_code() {
        let campaign = seed_campaign(pro_user().id);
        assert!(campaign.contains(seed_qr_id()));
        assert_eq!(campaign.name, "Lançamento de Verão");
    }

    #[test]
    fn seed_code_counts_the_seed_scans() {
        let code = seed_qr_code(pro_user().id);
        assert_eq!(code.scan_count, SEED_SCAN_COUNT as u64);
        assert_eq!(code.short_url, "https://qrsns.io/a1b2c3d4");
    }
}
