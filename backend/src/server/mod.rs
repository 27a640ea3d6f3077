//! Server construction and middleware wiring.

pub mod settings;

pub use settings::Settings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use reqwest::Url;
use tracing::info;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::insights::InsightService;
use crate::domain::workspace::Workspace;
use crate::inbound::http::campaigns::{create_campaign, list_campaigns};
use crate::inbound::http::dashboard::{get_dashboard, get_dashboard_report};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::insights::{get_weekly_insights, query_insights};
use crate::inbound::http::qr_codes::{
    create_qr_code, delete_qr_code, get_qr_code_analytics, get_qr_code_preview, list_qr_codes,
    preview_draft, simulate_scan, update_qr_code,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{get_user, switch_plan};
use crate::middleware::trace::Trace;
use crate::outbound::gemini::GeminiModel;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the insight service from configuration.
///
/// Without an API key the service runs in demo mode and serves canned
/// markup instead of calling out.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured endpoint does not parse
/// or the HTTP client cannot be constructed.
pub fn build_insight_service(settings: &Settings) -> std::io::Result<Arc<InsightService>> {
    match &settings.gemini_api_key {
        None => {
            info!("no Gemini API key configured; insights run in demo mode");
            Ok(Arc::new(InsightService::demo()))
        }
        Some(api_key) => {
            let endpoint = Url::parse(settings.gemini_endpoint()).map_err(|error| {
                std::io::Error::other(format!("invalid Gemini endpoint: {error}"))
            })?;
            let model = GeminiModel::new(endpoint, settings.gemini_model(), api_key.clone())
                .map_err(|error| {
                    std::io::Error::other(format!("Gemini client construction failed: {error}"))
                })?;
            Ok(Arc::new(InsightService::new(Arc::new(model))))
        }
    }
}

/// Assemble the application with every route mounted.
///
/// Public so integration tests can exercise the full surface without
/// binding a socket.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(get_dashboard)
        .service(get_dashboard_report)
        .service(list_qr_codes)
        .service(create_qr_code)
        .service(preview_draft)
        .service(update_qr_code)
        .service(delete_qr_code)
        .service(simulate_scan)
        .service(get_qr_code_analytics)
        .service(get_qr_code_preview)
        .service(list_campaigns)
        .service(create_campaign)
        .service(get_weekly_insights)
        .service(query_insights)
        .service(get_user)
        .service(switch_plan);

    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct the HTTP server with a seeded demo workspace.
///
/// # Errors
/// Propagates [`std::io::Error`] when configuration is invalid or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: Settings,
) -> std::io::Result<Server> {
    let insights = build_insight_service(&settings)?;
    let workspace = Workspace::demo(Arc::new(DefaultClock), settings.seed());
    let http_state = web::Data::new(HttpState::new(workspace, insights));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(http_state.clone(), server_health_state.clone())
    })
    .bind(settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
