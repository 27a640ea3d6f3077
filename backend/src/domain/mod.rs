//! Domain model: entities, aggregation, the editor state machine, and the
//! workspace controller that owns all state.

pub mod analytics;
pub mod campaign;
pub mod demo_data;
pub mod editor;
pub mod error;
pub mod insights;
pub mod kpi;
pub mod ports;
pub mod qr_code;
pub mod report;
pub mod scan;
pub mod user;
pub mod workspace;

pub use error::{Error, ErrorCode};

/// Result type used by HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;
