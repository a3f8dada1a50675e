//! Image generator configuration parsed from environment variables.

use super::types::GenerateError;

pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_REQUEST_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_IMAGE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: GeneratorTimeouts,
}

impl GeneratorConfig {
    /// Build typed generator config from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`
    ///
    /// Optional:
    /// - `IMAGE_MODEL`: default `gpt-image-1`
    /// - `OPENAI_BASE_URL`: default OpenAI API base URL
    /// - `IMAGE_REQUEST_TIMEOUT_SECS`: default 180
    /// - `IMAGE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingApiKey`] when the key is unset or blank,
    /// and [`GenerateError::ConfigParse`] when a timeout is not a whole number
    /// of seconds.
    pub fn from_env() -> Result<Self, GenerateError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerateError::MissingApiKey { var: "OPENAI_API_KEY".into() })?;

        let model = std::env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = GeneratorTimeouts {
            request_secs: env_parse_u64("IMAGE_REQUEST_TIMEOUT_SECS", DEFAULT_IMAGE_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("IMAGE_CONNECT_TIMEOUT_SECS", DEFAULT_IMAGE_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

/// Read an optional integer env var. Unset or blank means `default`.
pub(crate) fn env_parse_u64(key: &str, default: u64) -> Result<u64, GenerateError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| GenerateError::ConfigParse(format!("{key}={raw:?}: {e}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
