//! Configuration module
//!
//! The only setting the submission core truly depends on is the backend base
//! URL; the rest tunes frame sampling and the HTTP client.

use std::env;

use crate::constants::DEFAULT_FRAME_COUNT;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const JPEG_QUALITY: u8 = 90;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Frame count must be at least 1")]
    InvalidFrameCount,

    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidJpegQuality(u8),
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    pub frame_count: usize,
    pub request_timeout_secs: u64,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub jpeg_quality: u8,
    /// Send a single artifact under the `file` field instead of `files`.
    pub legacy_single_field: bool,
    /// Selecting a file clears the URL and vice versa.
    pub exclusive_inputs: bool,
    /// Front-end origin used to build share links. Share links are off when unset.
    pub share_base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            frame_count: DEFAULT_FRAME_COUNT,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            jpeg_quality: JPEG_QUALITY,
            legacy_single_field: false,
            exclusive_inputs: true,
            share_base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source. Malformed numbers fall back
    /// to their defaults; structurally invalid values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            api_url: lookup("MOVIENAME_API_URL")
                .or_else(|| lookup("API_URL"))
                .unwrap_or(defaults.api_url)
                .trim()
                .trim_end_matches('/')
                .to_string(),
            frame_count: lookup("MOVIENAME_FRAME_COUNT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.frame_count),
            request_timeout_secs: lookup("MOVIENAME_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or(defaults.ffmpeg_path),
            ffprobe_path: lookup("FFPROBE_PATH").unwrap_or(defaults.ffprobe_path),
            jpeg_quality: lookup("MOVIENAME_JPEG_QUALITY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.jpeg_quality),
            legacy_single_field: lookup("MOVIENAME_LEGACY_SINGLE_FIELD")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.legacy_single_field),
            exclusive_inputs: lookup("MOVIENAME_EXCLUSIVE_INPUTS")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.exclusive_inputs),
            share_base_url: lookup("MOVIENAME_SHARE_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.frame_count == 0 {
            return Err(ConfigError::InvalidFrameCount);
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::InvalidJpegQuality(self.jpeg_quality));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
