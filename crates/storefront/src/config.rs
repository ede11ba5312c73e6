//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `AMBERLEAF_API_BASE_URL` - Base URL of the remote store API
//!
//! ## Optional
//! - `AMBERLEAF_COMPARE_LIMIT` - Maximum compare list size (default: 4)
//! - `AMBERLEAF_CATALOG_CACHE_TTL_SECS` - Catalog cache TTL (default: 300)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default maximum number of products in the compare list.
pub const DEFAULT_COMPARE_LIMIT: usize = 4;

const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the remote store API.
    pub api_base_url: Url,
    /// Maximum number of products the compare list holds.
    pub compare_limit: usize,
    /// How long catalog responses are cached.
    pub catalog_cache_ttl: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "AMBERLEAF_API_BASE_URL",
            &get_required_env("AMBERLEAF_API_BASE_URL")?,
        )?;

        let compare_limit = parse_compare_limit(
            "AMBERLEAF_COMPARE_LIMIT",
            get_optional_env("AMBERLEAF_COMPARE_LIMIT").as_deref(),
        )?;

        let catalog_cache_ttl_secs = get_env_or_default(
            "AMBERLEAF_CATALOG_CACHE_TTL_SECS",
            &DEFAULT_CATALOG_CACHE_TTL_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("AMBERLEAF_CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            compare_limit,
            catalog_cache_ttl: Duration::from_secs(catalog_cache_ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate the API base URL.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Parse the compare limit, falling back to the default when unset.
///
/// Zero is rejected: a compare list that can hold nothing is a
/// misconfiguration, not a feature toggle.
fn parse_compare_limit(var_name: &str, raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_COMPARE_LIMIT);
    };

    let limit = raw
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if limit == 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be at least 1".to_string(),
        ));
    }

    Ok(limit)
}
