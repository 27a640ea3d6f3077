//! QR-code API handlers.
//!
//! ```text
//! GET    /api/v1/qrcodes
//! POST   /api/v1/qrcodes
//! PUT    /api/v1/qrcodes/{id}
//! DELETE /api/v1/qrcodes/{id}
//! POST   /api/v1/qrcodes/{id}/scans
//! GET    /api/v1/qrcodes/{id}/analytics
//! GET    /api/v1/qrcodes/{id}/preview
//! POST   /api/v1/qrcodes/preview
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::analytics::{
    CityScans, DailyScans, TOP_CITIES_DEFAULT, scans_by_day, scans_for, top_cities,
};
use crate::domain::editor::{QrCodeDraft, QrCodeEditor};
use crate::domain::qr_code::{QrCode, QrCodeId};
use crate::domain::scan::Scan;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, map_editor_error, map_workspace_error};
use crate::outbound::qr_image::QrImageRequest;

/// Rendered image URL for a draft or stored code. `url` is `null` while the
/// draft's destination is invalid, mirroring the suppressed editor preview.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub url: Option<String>,
}

/// Per-code analytics view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalyticsResponse {
    pub qr_code: QrCode,
    pub scans_by_day: Vec<DailyScans>,
    pub top_cities: Vec<CityScans>,
}

/// List every QR code, insertion-ordered.
#[utoipa::path(
    get,
    path = "/api/v1/qrcodes",
    responses(
        (status = 200, description = "QR codes", body = [QrCode]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "listQrCodes"
)]
#[get("/qrcodes")]
pub async fn list_qr_codes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<QrCode>>> {
    let workspace = state.workspace()?;
    Ok(web::Json(workspace.qr_codes().to_vec()))
}

/// Create a QR code from a submitted draft.
///
/// The draft passes the wizard's final validation before anything mutates,
/// so invalid destination URLs fail with the same field-level details the
/// form reports.
#[utoipa::path(
    post,
    path = "/api/v1/qrcodes",
    request_body = QrCodeDraft,
    responses(
        (status = 201, description = "QR code created", body = QrCode),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 404, description = "Campaign not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "createQrCode"
)]
#[post("/qrcodes")]
pub async fn create_qr_code(
    state: web::Data<HttpState>,
    payload: web::Json<QrCodeDraft>,
) -> ApiResult<HttpResponse> {
    let (target, draft) = QrCodeEditor::review(None, payload.into_inner())
        .finish()
        .map_err(map_editor_error)?;
    let mut workspace = state.workspace_mut()?;
    let saved = workspace
        .save_qr_code(target, draft)
        .map_err(map_workspace_error)?;
    Ok(HttpResponse::Created().json(saved))
}

/// Update an existing QR code from a submitted draft.
#[utoipa::path(
    put,
    path = "/api/v1/qrcodes/{id}",
    request_body = QrCodeDraft,
    params(("id" = Uuid, Path, description = "QR code identifier")),
    responses(
        (status = 200, description = "QR code updated", body = QrCode),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 404, description = "QR code or campaign not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "updateQrCode"
)]
#[put("/qrcodes/{id}")]
pub async fn update_qr_code(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<QrCodeDraft>,
) -> ApiResult<web::Json<QrCode>> {
    let id = QrCodeId::from_uuid(path.into_inner());
    let (target, draft) = QrCodeEditor::review(Some(id), payload.into_inner())
        .finish()
        .map_err(map_editor_error)?;
    let mut workspace = state.workspace_mut()?;
    let saved = workspace
        .save_qr_code(target, draft)
        .map_err(map_workspace_error)?;
    Ok(web::Json(saved))
}

/// Delete a QR code. Historical scans are kept for aggregates.
#[utoipa::path(
    delete,
    path = "/api/v1/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "QR code identifier")),
    responses(
        (status = 204, description = "QR code deleted"),
        (status = 404, description = "QR code not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "deleteQrCode"
)]
#[delete("/qrcodes/{id}")]
pub async fn delete_qr_code(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = QrCodeId::from_uuid(path.into_inner());
    let mut workspace = state.workspace_mut()?;
    workspace.delete_qr_code(id).map_err(map_workspace_error)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record one simulated scan against a QR code.
#[utoipa::path(
    post,
    path = "/api/v1/qrcodes/{id}/scans",
    params(("id" = Uuid, Path, description = "QR code identifier")),
    responses(
        (status = 201, description = "Scan recorded", body = Scan),
        (status = 404, description = "QR code not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "simulateScan"
)]
#[post("/qrcodes/{id}/scans")]
pub async fn simulate_scan(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = QrCodeId::from_uuid(path.into_inner());
    let mut workspace = state.workspace_mut()?;
    let scan = workspace.simulate_scan(id).map_err(map_workspace_error)?;
    Ok(HttpResponse::Created().json(scan))
}

/// Aggregates scoped to one QR code.
#[utoipa::path(
    get,
    path = "/api/v1/qrcodes/{id}/analytics",
    params(("id" = Uuid, Path, description = "QR code identifier")),
    responses(
        (status = 200, description = "Per-code analytics", body = CodeAnalyticsResponse),
        (status = 404, description = "QR code not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "getQrCodeAnalytics"
)]
#[get("/qrcodes/{id}/analytics")]
pub async fn get_qr_code_analytics(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CodeAnalyticsResponse>> {
    let id = QrCodeId::from_uuid(path.into_inner());
    let workspace = state.workspace()?;
    let code = workspace
        .qr_code(id)
        .ok_or_else(|| Error::not_found(format!("QR code {id} not found")))?
        .clone();
    let scoped = scans_for(workspace.scans(), id);
    Ok(web::Json(CodeAnalyticsResponse {
        qr_code: code,
        scans_by_day: scans_by_day(&scoped),
        top_cities: top_cities(&scoped, TOP_CITIES_DEFAULT),
    }))
}

/// Image URL for a stored code's destination and design.
#[utoipa::path(
    get,
    path = "/api/v1/qrcodes/{id}/preview",
    params(("id" = Uuid, Path, description = "QR code identifier")),
    responses(
        (status = 200, description = "Rendered image URL", body = PreviewResponse),
        (status = 404, description = "QR code not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "getQrCodePreview"
)]
#[get("/qrcodes/{id}/preview")]
pub async fn get_qr_code_preview(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<PreviewResponse>> {
    let id = QrCodeId::from_uuid(path.into_inner());
    let workspace = state.workspace()?;
    let code = workspace
        .qr_code(id)
        .ok_or_else(|| Error::not_found(format!("QR code {id} not found")))?;
    let request = QrImageRequest::preview(code.destination_url.clone(), &code.design);
    Ok(web::Json(PreviewResponse {
        url: Some(request.url().to_string()),
    }))
}

/// Image URL for an in-progress draft; `null` while the destination is
/// invalid.
#[utoipa::path(
    post,
    path = "/api/v1/qrcodes/preview",
    request_body = QrCodeDraft,
    responses(
        (status = 200, description = "Rendered image URL or null", body = PreviewResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["qrcodes"],
    operation_id = "previewDraft"
)]
#[post("/qrcodes/preview")]
pub async fn preview_draft(
    payload: web::Json<QrCodeDraft>,
) -> ApiResult<web::Json<PreviewResponse>> {
    let editor = QrCodeEditor::review(None, payload.into_inner());
    let url = editor
        .preview_destination()
        .map(|destination| QrImageRequest::preview(destination, &editor.draft().design))
        .map(|request| request.url().to_string());
    Ok(web::Json(PreviewResponse { url }))
}
