//! Campaign API handlers.
//!
//! ```text
//! GET  /api/v1/campaigns
//! POST /api/v1/campaigns {"name":"Lançamento de Verão"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::campaign::Campaign;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, map_workspace_error};

/// Body for `POST /api/v1/campaigns`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
}

/// List campaigns with their member QR-code ids.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    responses(
        (status = 200, description = "Campaigns", body = [Campaign]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "listCampaigns"
)]
#[get("/campaigns")]
pub async fn list_campaigns(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Campaign>>> {
    let workspace = state.workspace()?;
    Ok(web::Json(workspace.campaigns().to_vec()))
}

/// Create an empty campaign.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid name", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "createCampaign"
)]
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCampaignRequest>,
) -> ApiResult<HttpResponse> {
    let mut workspace = state.workspace_mut()?;
    let campaign = workspace
        .create_campaign(&payload.name)
        .map_err(map_workspace_error)?;
    Ok(HttpResponse::Created().json(campaign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::demo_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn seeded_campaign_lists_its_member() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(list_campaigns)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/campaigns").to_request();
        let body: Vec<Campaign> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].name, "Lançamento de Verão");
        assert_eq!(body[0].qr_code_ids.len(), 1);
    }

    #[actix_web::test]
    async fn blank_names_are_rejected_with_details() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(create_campaign)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .set_json(json!({"name": "   "}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "name");
    }

    #[actix_web::test]
    async fn names_are_trimmed_on_create() {
        let app = test::init_service(
            App::new()
                .app_data(demo_state())
                .service(web::scope("/api/v1").service(create_campaign)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .set_json(json!({"name": "  Black Friday  "}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Campaign = test::read_body_json(res).await;
        assert_eq!(body.name, "Black Friday");
        assert!(body.qr_code_ids.is_empty());
    }
}
