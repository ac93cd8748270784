//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::net::api::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const TOKEN_DIR_NAME: &str = ".stockpredictor";
pub const TOKEN_FILE_NAME: &str = "token";

/// Errors produced while building [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The service base URL is not an absolute http(s) URL.
    #[error("invalid PREDICTOR_BASE_URL: {0}")]
    InvalidBaseUrl(String),

    /// No token file was configured and no home directory could be found.
    #[error("cannot locate a home directory; set PREDICTOR_TOKEN_FILE")]
    NoTokenLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PREDICTOR_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `PREDICTOR_TOKEN_FILE`: default `~/.stockpredictor/token`
    /// - `PREDICTOR_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PREDICTOR_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or no token location
    /// can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_base_url(lookup("PREDICTOR_BASE_URL").as_deref())?;
        let token_file = match lookup("PREDICTOR_TOKEN_FILE").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_token_file().ok_or(ConfigError::NoTokenLocation)?,
        };
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("PREDICTOR_REQUEST_TIMEOUT_SECS").as_deref(), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("PREDICTOR_CONNECT_TIMEOUT_SECS").as_deref(), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, token_file, timeouts })
    }

    /// Replace the base URL, applying the same checks as `PREDICTOR_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `raw` is not an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
        }
        self.base_url = parse_base_url(Some(raw))?;
        Ok(self)
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_BASE_URL);
    let has_scheme = raw.starts_with("http://") || raw.starts_with("https://");
    let trimmed = raw.trim_end_matches('/');
    if !has_scheme || trimmed.ends_with(':') || trimmed.ends_with("//") {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn default_token_file() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().join(TOKEN_DIR_NAME).join(TOKEN_FILE_NAME))
}
