//! Server configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::gemini;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SEED: u64 = 42;

/// Process configuration, environment-prefixed with `QR_SENSE_`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QR_SENSE")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Gemini API key. Absent means demo mode: canned insight markup.
    pub gemini_api_key: Option<String>,
    /// Model identifier for insight generation.
    pub gemini_model: Option<String>,
    /// API root override, mainly for tests against a stub.
    pub gemini_endpoint: Option<String>,
    /// RNG seed for the simulated scan dimensions.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(gemini::DEFAULT_MODEL)
    }

    pub fn gemini_endpoint(&self) -> &str {
        self.gemini_endpoint
            .as_deref()
            .unwrap_or(gemini::DEFAULT_ENDPOINT)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("QR_SENSE_BIND_ADDR", None::<String>),
            ("QR_SENSE_GEMINI_API_KEY", None::<String>),
            ("QR_SENSE_GEMINI_MODEL", None::<String>),
            ("QR_SENSE_GEMINI_ENDPOINT", None::<String>),
            ("QR_SENSE_SEED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.gemini_model(), gemini::DEFAULT_MODEL);
        assert_eq!(settings.gemini_endpoint(), gemini::DEFAULT_ENDPOINT);
        assert_eq!(settings.seed(), DEFAULT_SEED);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("QR_SENSE_BIND_ADDR", Some("0.0.0.0:9000".to_owned())),
            ("QR_SENSE_GEMINI_API_KEY", Some("test-key".to_owned())),
            ("QR_SENSE_GEMINI_MODEL", Some("gemini-test".to_owned())),
            (
                "QR_SENSE_GEMINI_ENDPOINT",
                Some("http://127.0.0.1:9999/".to_owned()),
            ),
            ("QR_SENSE_SEED", Some("7".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:9000");
        assert_eq!(settings.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(settings.gemini_model(), "gemini-test");
        assert_eq!(settings.gemini_endpoint(), "http://127.0.0.1:9999/");
        assert_eq!(settings.seed(), 7);
    }
}
