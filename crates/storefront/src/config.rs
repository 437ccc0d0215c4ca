//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TOMATO_API_BASE_URL` - REST API root (default: `http://localhost:8080/api`)
//! - `TOMATO_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `TOMATO_DATA_DIR` - Directory holding the persisted session token (default: `.tomato`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_DATA_DIR: &str = ".tomato";

/// File name of the persisted token inside the data directory.
pub const TOKEN_FILE_NAME: &str = "token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// API root; service paths are appended to it
    pub base_url: Url,
    /// Request timeout applied by the HTTP transport
    pub timeout: Duration,
    /// Directory for durable client state
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Build a configuration for an explicit API root with default timeout
    /// and data directory.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(10),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "TOMATO_API_BASE_URL",
            &get_env_or_default("TOMATO_API_BASE_URL", DEFAULT_BASE_URL),
        )?;
        let timeout = parse_timeout(
            "TOMATO_API_TIMEOUT_SECS",
            &get_env_or_default("TOMATO_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        )?;
        let data_dir = PathBuf::from(get_env_or_default("TOMATO_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            base_url,
            timeout,
            data_dir,
        })
    }

    /// Path of the persisted token file.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE_NAME)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_timeout(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
