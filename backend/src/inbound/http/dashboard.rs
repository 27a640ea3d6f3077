//! Dashboard API handlers.
//!
//! ```text
//! GET /api/v1/dashboard
//! GET /api/v1/dashboard/report
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::analytics::{CityScans, DailyScans, TOP_CITIES_DEFAULT, scans_by_day, top_cities};
use crate::domain::kpi::{Kpi, compute_kpis};
use crate::domain::qr_code::QrCode;
use crate::domain::report::{PerformanceReport, build_performance_report};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const TOP_QR_CODES: usize = 5;

/// Everything the dashboard view renders in one round trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpis: Vec<Kpi>,
    pub scans_by_day: Vec<DailyScans>,
    pub top_cities: Vec<CityScans>,
    /// Most-scanned codes, at most five.
    pub top_qr_codes: Vec<QrCode>,
}

/// Aggregate dashboard view over the whole workspace.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardResponse>> {
    let workspace = state.workspace()?;
    let scans = workspace.scans();

    let mut ranked: Vec<QrCode> = workspace.qr_codes().to_vec();
    ranked.sort_by(|a, b| b.scan_count.cmp(&a.scan_count));
    ranked.truncate(TOP_QR_CODES);

    Ok(web::Json(DashboardResponse {
        kpis: compute_kpis(scans, workspace.now()),
        scans_by_day: scans_by_day(scans),
        top_cities: top_cities(scans, TOP_CITIES_DEFAULT),
        top_qr_codes: ranked,
    }))
}

/// Performance-report payload for the client-side PDF renderer.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/report",
    responses(
        (status = 200, description = "Report contract", body = PerformanceReport),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboardReport"
)]
#[get("/dashboard/report")]
pub async fn get_dashboard_report(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PerformanceReport>> {
    let workspace = state.workspace()?;
    Ok(web::Json(build_performance_report(
        workspace.qr_codes(),
        workspace.scans(),
        workspace.now(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::REPORT_TITLE;
    use crate::inbound::http::test_utils::demo_state;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn dashboard_aggregates_the_seeded_workspace() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(get_dashboard)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/dashboard").to_request();
        let body: DashboardResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.kpis.len(), 4);
        assert!(!body.scans_by_day.is_empty());
        assert!(
            body.scans_by_day
                .windows(2)
                .all(|pair| pair[0].date < pair[1].date)
        );
        assert!(body.top_cities.len() <= TOP_CITIES_DEFAULT);
        assert_eq!(body.top_qr_codes.len(), 1);
    }

    #[actix_web::test]
    async fn report_matches_the_fixed_contract() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(get_dashboard_report)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/report")
            .to_request();
        let body: PerformanceReport = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.title, REPORT_TITLE);
        assert!(body.file_name.starts_with("relatorio_qrsense_"));
        assert!(body.file_name.ends_with(".pdf"));
        assert_eq!(body.kpis.len(), 4);
    }
}
