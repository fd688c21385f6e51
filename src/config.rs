//! Configuration management for the MovieFan catalog client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

use url::Url;

/// Backend used when neither `MOVIEFAN_API_URL` nor `API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";

/// Directory name below the platform data directory.
pub const APP_DIR: &str = "moviefan";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API url '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API url '{0}' cannot be used as a base url")]
    NotABase(String),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is not an
/// error: every setting has a default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moviefan/.env`
/// - macOS: `~/Library/Application Support/moviefan/.env`
/// - Windows: `%LOCALAPPDATA%/moviefan/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the directory holding the cookie jar and `.env` file.
///
/// `MOVIEFAN_DATA_DIR` overrides the platform default.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("MOVIEFAN_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the raw backend base url.
///
/// Reads `MOVIEFAN_API_URL`, then `API_URL`, then falls back to [`DEFAULT_API_URL`].
pub fn api_url() -> String {
    env::var("MOVIEFAN_API_URL")
        .or_else(|_| env::var("API_URL"))
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the tracing filter directive from `MOVIEFAN_LOG`.
pub fn log_filter() -> String {
    env::var("MOVIEFAN_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Returns a raw `name=value; ...` cookie header used to seed the jar, if any.
pub fn cookie_header() -> Option<String> {
    env::var("MOVIEFAN_COOKIE")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Parses the backend url and guarantees a trailing slash, so relative
/// endpoints such as `movies/7` resolve below the api prefix.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(trimmed.to_string()));
    }

    Ok(url)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub data_dir: PathBuf,
    pub cookie_header: Option<String>,
}

impl Config {
    pub fn new(api_url: &str, data_dir: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            data_dir,
            cookie_header: None,
        })
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(&api_url(), data_dir())?;
        config.cookie_header = cookie_header();
        Ok(config)
    }

    pub fn cookie_path(&self) -> PathBuf {
        self.data_dir.join("cookies.json")
    }
}
