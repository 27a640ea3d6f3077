//! Structured performance report served to the PDF-rendering client.
//!
//! The backend supplies the figures and suggested file name; layout and
//! rendering stay client-side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analytics::{TOP_CITIES_DEFAULT, top_cities};
use super::kpi::compute_kpis;
use super::qr_code::QrCode;
use super::scan::Scan;

/// Fixed report heading.
pub const REPORT_TITLE: &str = "Relatório de Performance - QR Sense";

const TOP_QR_CODES: usize = 5;

/// One KPI row in the report summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportKpi {
    pub label: String,
    /// Current value with its delta, e.g. `42 (+10%)`.
    pub value: String,
}

/// One row of the top-QR-codes table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeReportRow {
    pub name: String,
    pub scan_count: u64,
    pub created_at: NaiveDate,
}

/// One row of the top-cities table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityReportRow {
    pub city: String,
    pub scan_count: u64,
}

/// Everything the client needs to lay out the performance PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub kpis: Vec<ReportKpi>,
    pub top_qr_codes: Vec<QrCodeReportRow>,
    pub top_cities: Vec<CityReportRow>,
    /// Suggested download name, dated by generation day.
    pub file_name: String,
}

/// Assemble the report from current workspace contents.
pub fn build_performance_report(
    qr_codes: &[QrCode],
    scans: &[Scan],
    now: DateTime<Utc>,
) -> PerformanceReport {
    let kpis = compute_kpis(scans, now)
        .into_iter()
        .map(|kpi| ReportKpi {
            label: kpi.title,
            value: format!("{} ({})", kpi.value, kpi.change),
        })
        .collect();

    let mut ranked: Vec<&QrCode> = qr_codes.iter().collect();
    ranked.sort_by(|a, b| b.scan_count.cmp(&a.scan_count));
    let top_qr_codes = ranked
        .into_iter()
        .take(TOP_QR_CODES)
        .map(|code| QrCodeReportRow {
            name: code.name.clone(),
            scan_count: code.scan_count,
            created_at: code.created_at.date_naive(),
        })
        .collect();

    let top_cities = top_cities(scans, TOP_CITIES_DEFAULT)
        .into_iter()
        .map(|bucket| CityReportRow {
            city: bucket.city,
            scan_count: bucket.count,
        })
        .collect();

    PerformanceReport {
        title: REPORT_TITLE.to_string(),
        generated_at: now,
        kpis,
        top_qr_codes,
        top_cities,
        file_name: format!("relatorio_qrsense_{}.pdf", now.format("%Y-%m-%d")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo_data;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn report_carries_title_date_stamped_file_name_and_tables() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 9, 30, 0).single().expect("valid timestamp");
        let owner = demo_data::pro_user().id;
        let codes = vec![demo_data::seed_qr_code(owner)];
        let mut rng = SmallRng::seed_from_u64(3);
        let scans = demo_data::seed_scans(now, &mut rng);

        let report = build_performance_report(&codes, &scans, now);
        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.file_name, "relatorio_qrsense_2026-08-25.pdf");
        assert_eq!(report.kpis.len(), 4);
        assert_eq!(report.top_qr_codes.len(), 1);
        assert!(!report.top_cities.is_empty());
        assert!(report.top_cities.len() <= 5);
    }

    #[test]
    fn top_codes_rank_by_scan_count() {
        let now = Utc::now();
        let owner = demo_data::pro_user().id;
        let mut busy = demo_data::seed_qr_code(owner);
        busy.scan_count = 90;
        busy.name = "Busy".to_string();
        let quiet = demo_data::seed_qr_code(owner);

        let report = build_performance_report(&[quiet, busy], &[], now);
        assert_eq!(report.top_qr_codes[0].name, "Busy");
        assert_eq!(report.top_qr_codes[0].scan_count, 90);
    }
}
