//! From trait implementations for SteadyError conversions

use super::types::SteadyError;

impl From<reqwest::Error> for SteadyError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.to_string());
        if error.is_timeout() {
            return Self::transport_timeout(error.to_string(), url);
        }
        if error.is_decode() {
            return Self::decode(error.to_string());
        }
        Self::Transport {
            message: error.to_string(),
            url,
            timeout: false,
        }
    }
}

impl From<serde_json::Error> for SteadyError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode_with_context(
            error.to_string(),
            format!("line {}, column {}", error.line(), error.column()),
        )
    }
}

impl From<toml::de::Error> for SteadyError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_with_context(error.to_string(), "Parsing TOML configuration")
    }
}
