//! OpenAPI documentation configuration.
//!
//! Registers every HTTP endpoint and the wire schemas they reference. The
//! generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::analytics::{CityScans, DailyScans};
use crate::domain::campaign::Campaign;
use crate::domain::editor::QrCodeDraft;
use crate::domain::kpi::{Kpi, Trend};
use crate::domain::qr_code::{QrCode, QrCodeType, QrDesign};
use crate::domain::report::{CityReportRow, PerformanceReport, QrCodeReportRow, ReportKpi};
use crate::domain::scan::Scan;
use crate::domain::user::{Plan, User, UserStatus};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::campaigns::CreateCampaignRequest;
use crate::inbound::http::dashboard::DashboardResponse;
use crate::inbound::http::insights::{InsightQueryRequest, InsightResponse};
use crate::inbound::http::qr_codes::{CodeAnalyticsResponse, PreviewResponse};
use crate::outbound::qr_image::QrImageRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Sense backend API",
        description = "HTTP interface for the single-user QR campaign demo dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::dashboard::get_dashboard_report,
        crate::inbound::http::qr_codes::list_qr_codes,
        crate::inbound::http::qr_codes::create_qr_code,
        crate::inbound::http::qr_codes::update_qr_code,
        crate::inbound::http::qr_codes::delete_qr_code,
        crate::inbound::http::qr_codes::simulate_scan,
        crate::inbound::http::qr_codes::get_qr_code_analytics,
        crate::inbound::http::qr_codes::get_qr_code_preview,
        crate::inbound::http::qr_codes::preview_draft,
        crate::inbound::http::campaigns::list_campaigns,
        crate::inbound::http::campaigns::create_campaign,
        crate::inbound::http::insights::get_weekly_insights,
        crate::inbound::http::insights::query_insights,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::switch_plan,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Plan,
        UserStatus,
        QrCode,
        QrCodeType,
        QrDesign,
        QrCodeDraft,
        Scan,
        Campaign,
        CreateCampaignRequest,
        Kpi,
        Trend,
        DailyScans,
        CityScans,
        DashboardResponse,
        CodeAnalyticsResponse,
        PreviewResponse,
        QrImageRequest,
        PerformanceReport,
        ReportKpi,
        QrCodeReportRow,
        CityReportRow,
        InsightQueryRequest,
        InsightResponse,
    )),
    tags(
        (name = "dashboard", description = "Aggregate views over the scan collection"),
        (name = "qrcodes", description = "QR-code lifecycle and analytics"),
        (name = "campaigns", description = "Campaign grouping"),
        (name = "insights", description = "AI-generated analytics (Pro only)"),
        (name = "user", description = "Demo identity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
