//! Dashboard KPI cards computed from the live scan collection.
//!
//! Each card compares a trailing window against the immediately preceding
//! window of equal length. The figures are derived on read; nothing here is
//! fixture data.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::scan::Scan;

/// Direction of the period-over-period delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increase,
    Decrease,
}

/// Presentation-ready summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: String,
    /// Formatted current-window count.
    pub value: String,
    /// Formatted delta against the previous window, e.g. `+18%`.
    pub change: String,
    pub change_type: Trend,
}

/// Compute the four dashboard cards from the scan collection.
///
/// Windows are measured backwards from `now`: the current day, the trailing
/// 7 and 30 days, and the trailing 24 hours.
pub fn compute_kpis(scans: &[Scan], now: DateTime<Utc>) -> Vec<Kpi> {
    vec![
        window_kpi("Scans Hoje", scans, now, Duration::days(1)),
        window_kpi("Scans (7d)", scans, now, Duration::days(7)),
        window_kpi("Scans (30d)", scans, now, Duration::days(30)),
        window_kpi("Novos Scans (24h)", scans, now, Duration::hours(24)),
    ]
}

fn window_kpi(title: &str, scans: &[Scan], now: DateTime<Utc>, window: Duration) -> Kpi {
    let current = count_between(scans, now - window, now);
    let previous = count_between(scans, now - window - window, now - window);
    let (change, change_type) = format_delta(current, previous);
    Kpi {
        title: title.to_string(),
        value: current.to_string(),
        change,
        change_type,
    }
}

fn count_between(scans: &[Scan], from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    scans
        .iter()
        .filter(|scan| scan.timestamp >= from && scan.timestamp < to)
        .count() as u64
}

/// An empty previous window with activity reads as +100%; two empty windows
/// read as a flat +0%.
fn format_delta(current: u64, previous: u64) -> (String, Trend) {
    let percent: i64 = if previous == 0 {
        if current == 0 { 0 } else { 100 }
    } else {
        ((current as i64 - previous as i64) * 100) / previous as i64
    };
    let trend = if current >= previous {
        Trend::Increase
    } else {
        Trend::Decrease
    };
    let formatted = if percent >= 0 {
        format!("+{percent}%")
    } else {
        format!("{percent}%")
    };
    (formatted, trend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qr_code::QrCodeId;
    use crate::domain::scan::{SCAN_COUNTRY, ScanId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn scan_hours_ago(now: DateTime<Utc>, hours: i64) -> Scan {
        Scan {
            id: ScanId::random(),
            qr_id: QrCodeId::random(),
            timestamp: now - Duration::hours(hours),
            country: SCAN_COUNTRY.to_string(),
            city: "São Paulo".to_string(),
            device: "Mobile".to_string(),
            os: "Android".to_string(),
            browser: "Chrome".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).single().expect("valid timestamp")
    }

    #[rstest]
    #[case(4, 2, "+100%", Trend::Increase)]
    #[case(1, 2, "-50%", Trend::Decrease)]
    #[case(3, 0, "+100%", Trend::Increase)]
    #[case(0, 0, "+0%", Trend::Increase)]
    #[case(2, 2, "+0%", Trend::Increase)]
    fn delta_formatting(
        #[case] current: u64,
        #[case] previous: u64,
        #[case] change: &str,
        #[case] trend: Trend,
    ) {
        assert_eq!(format_delta(current, previous), (change.to_string(), trend));
    }

    #[test]
    fn cards_window_against_the_preceding_period() {
        let now = fixed_now();
        // Three scans in the last 24h, one in the 24h before that.
        let scans = vec![
            scan_hours_ago(now, 1),
            scan_hours_ago(now, 5),
            scan_hours_ago(now, 20),
            scan_hours_ago(now, 30),
        ];

        let kpis = compute_kpis(&scans, now);
        assert_eq!(kpis.len(), 4);
        let last_24h = kpis
            .iter()
            .find(|kpi| kpi.title == "Novos Scans (24h)")
            .expect("24h card");
        assert_eq!(last_24h.value, "3");
        assert_eq!(last_24h.change, "+200%");
        assert_eq!(last_24h.change_type, Trend::Increase);
    }

    #[test]
    fn empty_collection_yields_flat_cards() {
        let kpis = compute_kpis(&[], fixed_now());
        assert!(kpis.iter().all(|kpi| kpi.value == "0" && kpi.change == "+0%"));
    }
}
