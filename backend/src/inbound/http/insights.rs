//! AI insight API handlers. Both endpoints are Pro-gated.
//!
//! ```text
//! GET  /api/v1/insights
//! POST /api/v1/insights/query {"question":"Qual cidade lidera?"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::qr_code::QrCode;
use crate::domain::scan::Scan;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/v1/insights/query`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightQueryRequest {
    pub question: String,
}

/// Generated insight markup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    /// Rendered HTML fragment.
    pub html: String,
    /// True when a newer request superseded this one while it was in
    /// flight; clients should drop stale answers.
    pub stale: bool,
}

/// Copy the data the prompts need, releasing the lock before the model
/// round trip.
fn snapshot(state: &HttpState) -> ApiResult<(Vec<Scan>, Vec<QrCode>)> {
    let workspace = state.workspace()?;
    if !workspace.user().has_ai_access() {
        return Err(Error::forbidden(
            "AI insights require the Pro plan",
        ));
    }
    Ok((workspace.scans().to_vec(), workspace.qr_codes().to_vec()))
}

/// Weekly insight summary over the whole scan collection.
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    responses(
        (status = 200, description = "Weekly insight markup", body = InsightResponse),
        (status = 403, description = "Plan does not include AI insights", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["insights"],
    operation_id = "getWeeklyInsights"
)]
#[get("/insights")]
pub async fn get_weekly_insights(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<InsightResponse>> {
    let (scans, qr_codes) = snapshot(&state)?;
    let answer = state.insights().weekly_insights(&scans, &qr_codes).await;
    Ok(web::Json(InsightResponse {
        html: answer.html,
        stale: answer.stale,
    }))
}

/// Free-form natural-language question over the scan data.
#[utoipa::path(
    post,
    path = "/api/v1/insights/query",
    request_body = InsightQueryRequest,
    responses(
        (status = 200, description = "Answer markup", body = InsightResponse),
        (status = 403, description = "Plan does not include AI insights", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["insights"],
    operation_id = "queryInsights"
)]
#[post("/insights/query")]
pub async fn query_insights(
    state: web::Data<HttpState>,
    payload: web::Json<InsightQueryRequest>,
) -> ApiResult<web::Json<InsightResponse>> {
    let (scans, qr_codes) = snapshot(&state)?;
    let answer = state
        .insights()
        .answer(&payload.question, &scans, &qr_codes)
        .await;
    Ok(web::Json(InsightResponse {
        html: answer.html,
        stale: answer.stale,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo_data;
    use crate::domain::insights::DEMO_INSIGHTS_HTML;
    use crate::domain::workspace::Workspace;
    use crate::inbound::http::test_utils::{demo_state, state_with};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockable::DefaultClock;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn pro_users_get_the_demo_markup() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(get_weekly_insights)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/insights").to_request();
        let body: InsightResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.html, DEMO_INSIGHTS_HTML);
        assert!(!body.stale);
    }

    #[actix_web::test]
    async fn free_plan_requests_are_forbidden() {
        let workspace = Workspace::new(demo_data::free_user(), Arc::new(DefaultClock), 1);
        let app = test::init_service(
            App::new().app_data(state_with(workspace)).service(
                web::scope("/api/v1")
                    .service(get_weekly_insights)
                    .service(query_insights),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/insights").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "forbidden");

        let req = test::TestRequest::post()
            .uri("/api/v1/insights/query")
            .set_json(json!({"question": "quantos scans?"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn questions_echo_through_the_demo_answer() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(query_insights)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/insights/query")
            .set_json(json!({"question": "Qual cidade lidera?"}))
            .to_request();
        let body: InsightResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.html.contains("Qual cidade lidera?"));
    }
}
