//! User API handlers.
//!
//! ```text
//! GET  /api/v1/user
//! POST /api/v1/user/switch-plan
//! ```

use actix_web::{get, post, web};

use crate::domain::Error;
use crate::domain::user::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Current demo identity.
#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "getUser"
)]
#[get("/user")]
pub async fn get_user(state: web::Data<HttpState>) -> ApiResult<web::Json<User>> {
    let workspace = state.workspace()?;
    Ok(web::Json(workspace.user().clone()))
}

/// Toggle between the Free and Pro demo identities.
#[utoipa::path(
    post,
    path = "/api/v1/user/switch-plan",
    responses(
        (status = 200, description = "User after the switch", body = User),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "switchPlan"
)]
#[post("/user/switch-plan")]
pub async fn switch_plan(state: web::Data<HttpState>) -> ApiResult<web::Json<User>> {
    let mut workspace = state.workspace_mut()?;
    let user = workspace.switch_plan().clone();
    Ok(web::Json(user))
}
