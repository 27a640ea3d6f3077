//! Shared fixtures for handler tests.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::insights::InsightService;
use crate::domain::workspace::Workspace;
use crate::inbound::http::state::HttpState;

/// Demo workspace behind handler state, insight service in demo mode.
pub fn demo_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Workspace::demo(Arc::new(DefaultClock), 1),
        Arc::new(InsightService::demo()),
    ))
}

/// Handler state with a caller-supplied workspace.
pub fn state_with(workspace: Workspace) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(workspace, Arc::new(InsightService::demo())))
}
