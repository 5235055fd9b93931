//! Deployment configuration for the support chat client

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Base URL used when `API_BASE_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Per-attempt timeout used when `CHAT_TIMEOUT_MS` is unset
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_BASE_URL must be an absolute http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("CHAT_TIMEOUT_MS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

/// Configuration for the chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Prefix for every chat request (e.g. `https://books.example.com`)
    pub api_base_url: String,
    /// Attempt is abandoned and classified as a timeout after this long
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ChatConfig {
    /// Read `API_BASE_URL` and `CHAT_TIMEOUT_MS` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when either variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a base URL that is not absolute
    /// http(s), otherwise [`ConfigError::InvalidTimeout`] for a timeout that is not
    /// a positive number of milliseconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = match get("API_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let timeout = match get("CHAT_TIMEOUT_MS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_base_url,
            timeout,
        })
    }

    /// Full URL of the chat endpoint
    #[must_use]
    pub fn chat_endpoint(&self) -> String {
        format!("{}/api/chat", self.api_base_url.trim_end_matches('/'))
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(raw.to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
