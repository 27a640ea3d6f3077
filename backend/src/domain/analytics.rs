//! Pure aggregation over scan records.
//!
//! These functions never mutate their input and return empty output for
//! empty input. Buckets are keyed by [`chrono::NaiveDate`] so ordering is by
//! actual calendar date, independent of any locale-specific display format.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::qr_code::QrCodeId;
use super::scan::Scan;

/// Number of trailing daily buckets kept by [`scans_by_day`].
pub const DAILY_WINDOW: usize = 30;

/// Default ranking depth for [`top_cities`].
pub const TOP_CITIES_DEFAULT: usize = 5;

/// One calendar-day bucket of scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyScans {
    pub date: NaiveDate,
    pub count: u64,
}

/// One city bucket of scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityScans {
    pub city: String,
    pub count: u64,
}

/// Bucket scans by calendar date, ascending, keeping the most recent
/// [`DAILY_WINDOW`] buckets.
///
/// One bucket is produced per distinct date present in the input; absent
/// days are not zero-filled.
pub fn scans_by_day(scans: &[Scan]) -> Vec<DailyScans> {
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for scan in scans {
        *counts.entry(scan.timestamp.date_naive()).or_insert(0) += 1;
    }

    let mut buckets: Vec<DailyScans> = counts
        .into_iter()
        .map(|(date, count)| DailyScans { date, count })
        .collect();
    buckets.sort_by_key(|bucket| bucket.date);
    if buckets.len() > DAILY_WINDOW {
        buckets.drain(..buckets.len() - DAILY_WINDOW);
    }
    buckets
}

/// Rank cities by scan count, descending, truncated to `n`.
///
/// Ties keep first-encountered order: the ranking sort is stable over the
/// encounter-ordered buckets.
pub fn top_cities(scans: &[Scan], n: usize) -> Vec<CityScans> {
    let mut order: Vec<CityScans> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for scan in scans {
        if let Some(&at) = index.get(scan.city.as_str()) {
            if let Some(bucket) = order.get_mut(at) {
                bucket.count += 1;
            }
        } else {
            index.insert(scan.city.as_str(), order.len());
            order.push(CityScans {
                city: scan.city.clone(),
                count: 1,
            });
        }
    }

    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(n);
    order
}

/// Scope the scan collection to one QR code.
///
/// Returns a subsequence of the input; filtering twice by the same id is a
/// no-op on the result.
pub fn scans_for(scans: &[Scan], qr_id: QrCodeId) -> Vec<Scan> {
    scans
        .iter()
        .filter(|scan| scan.qr_id == qr_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::{SCAN_COUNTRY, ScanId};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn scan_at(qr_id: QrCodeId, days_ago: i64, city: &str) -> Scan {
        let base = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).single().expect("valid timestamp");
        Scan {
            id: ScanId::random(),
            qr_id,
            timestamp: base - Duration::days(days_ago),
            country: SCAN_COUNTRY.to_string(),
            city: city.to_string(),
            device: "Mobile".to_string(),
            os: "Android".to_string(),
            browser: "Chrome".to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        assert!(scans_by_day(&[]).is_empty());
        assert!(top_cities(&[], 5).is_empty());
    }

    #[test]
    fn daily_buckets_are_date_ordered_and_complete() {
        let qr = QrCodeId::random();
        // Deliberately unordered input across three days.
        let scans = vec![
            scan_at(qr, 0, "São Paulo"),
            scan_at(qr, 2, "São Paulo"),
            scan_at(qr, 1, "São Paulo"),
            scan_at(qr, 2, "Curitiba"),
        ];

        let buckets = scans_by_day(&scans);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.windows(2).all(|pair| pair[0].date < pair[1].date));
        let total: u64 = buckets.iter().map(|bucket| bucket.count).sum();
        assert_eq!(total, scans.len() as u64);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn daily_buckets_keep_only_the_most_recent_window() {
        let qr = QrCodeId::random();
        let scans: Vec<Scan> = (0..40).map(|d| scan_at(qr, d, "Salvador")).collect();

        let buckets = scans_by_day(&scans);
        assert_eq!(buckets.len(), DAILY_WINDOW);
        // The oldest ten days fall outside the window.
        let newest = scans[0].timestamp.date_naive();
        assert_eq!(buckets.last().map(|b| b.date), Some(newest));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    fn top_cities_respects_n_and_ordering(#[case] n: usize) {
        let qr = QrCodeId::random();
        let mut scans = Vec::new();
        for _ in 0..3 {
            scans.push(scan_at(qr, 0, "São Paulo"));
        }
        for _ in 0..2 {
            scans.push(scan_at(qr, 0, "Salvador"));
        }
        scans.push(scan_at(qr, 0, "Curitiba"));

        let ranking = top_cities(&scans, n);
        assert_eq!(ranking.len(), n.min(3));
        assert!(ranking.windows(2).all(|pair| pair[0].count >= pair[1].count));
        assert_eq!(ranking[0].city, "São Paulo");
    }

    #[test]
    fn top_cities_breaks_ties_by_first_encounter() {
        let qr = QrCodeId::random();
        let scans = vec![
            scan_at(qr, 0, "Salvador"),
            scan_at(qr, 0, "Curitiba"),
            scan_at(qr, 0, "Salvador"),
            scan_at(qr, 0, "Curitiba"),
        ];

        let ranking = top_cities(&scans, 5);
        assert_eq!(ranking[0].city, "Salvador");
        assert_eq!(ranking[1].city, "Curitiba");
    }

    #[test]
    fn scoping_filters_and_is_idempotent() {
        let mine = QrCodeId::random();
        let other = QrCodeId::random();
        let scans = vec![
            scan_at(mine, 0, "São Paulo"),
            scan_at(other, 0, "Salvador"),
            scan_at(mine, 1, "Curitiba"),
        ];

        let scoped = scans_for(&scans, mine);
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|scan| scan.qr_id == mine));
        assert_eq!(scans_for(&scoped, mine), scoped);
    }
}
