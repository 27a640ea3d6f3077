//! Reqwest-backed Gemini model adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{InsightModel, InsightModelError};

/// Default API root; overridable for tests against a local stub.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/";

/// Model identifier used unless configuration says otherwise.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini adapter performing `generateContent` calls against one endpoint.
pub struct GeminiModel {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl GeminiModel {
    /// Build an adapter with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, model, api_key, DEFAULT_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn generate_url(&self) -> Result<Url, InsightModelError> {
        self.endpoint
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|error| InsightModelError::Transport {
                message: format!("invalid model endpoint: {error}"),
            })
    }
}

#[async_trait]
impl InsightModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String, InsightModelError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .client
            .post(self.generate_url()?)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_generated_text(body.as_ref())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn parse_generated_text(body: &[u8]) -> Result<String, InsightModelError> {
    let decoded: GenerateContentResponse =
        serde_json::from_slice(body).map_err(|error| InsightModelError::Decode {
            message: format!("invalid generateContent payload: {error}"),
        })?;
    let candidate = decoded
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| InsightModelError::Decode {
            message: "response carried no candidates".to_string(),
        })?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();
    if text.is_empty() {
        return Err(InsightModelError::Decode {
            message: "candidate carried no text parts".to_string(),
        });
    }
    Ok(text)
}

fn map_transport_error(error: reqwest::Error) -> InsightModelError {
    InsightModelError::Transport {
        message: error.to_string(),
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> InsightModelError {
    InsightModelError::Status {
        status: status.as_u16(),
        message: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network request and decode helpers.

    use super::*;

    #[test]
    fn request_wraps_the_prompt_in_one_text_part() {
        let request = GenerateContentRequest::from_prompt("resuma os scans");
        let value = serde_json::to_value(&request).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{"parts": [{"text": "resuma os scans"}]}]
            })
        );
    }

    #[test]
    fn generate_url_embeds_the_model_name() {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("endpoint");
        let model = GeminiModel::new(endpoint, DEFAULT_MODEL, "key").expect("client");
        let url = model.generate_url().expect("url");
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn parses_candidate_text_parts_in_order() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "<h3>" }, { "text": "Resumo</h3>" } ] } }
            ]
        }"#;
        let text = parse_generated_text(body.as_bytes()).expect("decode");
        assert_eq!(text, "<h3>Resumo</h3>");
    }

    #[test]
    fn empty_candidate_lists_map_to_decode_errors() {
        let error = parse_generated_text(br#"{"candidates": []}"#).expect_err("no candidates");
        assert!(matches!(error, InsightModelError::Decode { .. }));

        let error = parse_generated_text(b"not json").expect_err("invalid JSON");
        assert!(matches!(error, InsightModelError::Decode { .. }));
    }

    #[test]
    fn status_errors_keep_a_compact_body_preview() {
        let long_body = "x".repeat(400);
        let error = map_status_error(StatusCode::TOO_MANY_REQUESTS, long_body.as_bytes());
        match error {
            InsightModelError::Status { status, message } => {
                assert_eq!(status, 429);
                assert!(message.chars().count() <= 163);
                assert!(message.ends_with("..."));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
