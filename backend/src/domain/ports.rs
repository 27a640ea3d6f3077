//! Outbound ports the domain depends on.

use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to a text-generation model.
#[derive(Debug, Clone, Error)]
pub enum InsightModelError {
    /// The request never completed.
    #[error("model transport failure: {message}")]
    Transport { message: String },
    /// The model answered with a non-success status.
    #[error("model returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be interpreted.
    #[error("model response could not be decoded: {message}")]
    Decode { message: String },
}

/// A text-generation model that turns a prompt into rendered HTML.
///
/// The production implementation is
/// [`GeminiModel`](crate::outbound::gemini::GeminiModel); tests substitute
/// a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsightModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InsightModelError>;
}
