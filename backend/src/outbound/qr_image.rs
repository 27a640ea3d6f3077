//! URL construction for the external QR-image rendering service.
//!
//! Rendering is a plain idempotent GET: the same request always yields the
//! same image, so clients may cache freely.

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::domain::qr_code::{HexColor, QrDesign};

const QR_IMAGE_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Rendered edge length used for editor previews, in pixels.
pub const DEFAULT_PREVIEW_SIZE: u32 = 200;

/// Everything needed to render one QR image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrImageRequest {
    /// Payload encoded into the image, typically a destination URL.
    pub data: String,
    /// Square edge length in pixels.
    pub size: u32,
    pub foreground: HexColor,
    pub background: HexColor,
}

impl QrImageRequest {
    /// A preview-sized request for a draft's destination and design.
    pub fn preview(data: impl Into<String>, design: &QrDesign) -> Self {
        Self {
            data: data.into(),
            size: DEFAULT_PREVIEW_SIZE,
            foreground: design.foreground_color.clone(),
            background: design.background_color.clone(),
        }
    }

    /// Render the request as the image service's GET URL.
    ///
    /// Colours are passed without their `#`; a one-pixel quiet zone keeps
    /// the code scannable against tight layouts.
    pub fn url(&self) -> Url {
        let mut url = Url::parse(QR_IMAGE_ENDPOINT)
            .unwrap_or_else(|error| panic!("QR image endpoint failed to parse: {error}"));
        url.query_pairs_mut()
            .append_pair("data", &self.data)
            .append_pair("size", &format!("{0}x{0}", self.size))
            .append_pair("color", self.foreground.without_hash())
            .append_pair("bgcolor", self.background.without_hash())
            .append_pair("qzone", "1");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_uses_the_default_size_and_design_colours() {
        let design = QrDesign::default();
        let request = QrImageRequest::preview("https://example.com", &design);
        assert_eq!(request.size, DEFAULT_PREVIEW_SIZE);

        let url = request.url();
        assert_eq!(url.host_str(), Some("api.qrserver.com"));
        assert_eq!(url.path(), "/v1/create-qr-code/");
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("data".to_string(), "https://example.com".to_string())));
        assert!(query.contains(&("size".to_string(), "200x200".to_string())));
        assert!(query.contains(&("color".to_string(), "000000".to_string())));
        assert!(query.contains(&("bgcolor".to_string(), "FFFFFF".to_string())));
        assert!(query.contains(&("qzone".to_string(), "1".to_string())));
    }

    #[test]
    fn identical_requests_render_identical_urls() {
        let design = QrDesign::default();
        let a = QrImageRequest::preview("https://example.com/x?y=1", &design);
        let b = QrImageRequest::preview("https://example.com/x?y=1", &design);
        assert_eq!(a.url(), b.url());
    }
}
