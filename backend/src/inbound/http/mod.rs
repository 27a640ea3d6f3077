//! HTTP inbound adapter exposing the REST endpoints.

pub mod campaigns;
pub mod dashboard;
pub mod health;
pub mod insights;
pub mod qr_codes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;

use serde_json::json;

use crate::domain::Error;
use crate::domain::editor::{DestinationUrlError, EditorError};
use crate::domain::workspace::WorkspaceError;

/// Map a workspace failure onto the API error schema.
pub(crate) fn map_workspace_error(err: WorkspaceError) -> Error {
    match err {
        WorkspaceError::QrCodeNotFound { .. } | WorkspaceError::CampaignNotFound { .. } => {
            Error::not_found(err.to_string())
        }
        WorkspaceError::EmptyCampaignName => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "name", "code": "empty_name" })),
    }
}

/// Map a wizard failure onto the API error schema, preserving the field
/// and code the form reports.
pub(crate) fn map_editor_error(err: EditorError) -> Error {
    let EditorError::Destination(destination) = err;
    let code = match destination {
        DestinationUrlError::Required => "required",
        DestinationUrlError::InvalidFormat => "invalid_format",
    };
    Error::invalid_request(destination.to_string())
        .with_details(json!({ "field": "destinationUrl", "code": code }))
}
