//! Bridge configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (database-backed use only)
//! - `ORDDD_DATABASE_URL` - `PostgreSQL` connection string for the host
//!   storage (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `ORDDD_EXCLUDED_METHODS` - comma-separated method types kept out of
//!   the fallback zone (default: `table_rate,flexible_shipping_ups`)
//! - `ORDDD_COMPAT_SCRIPT_URL` - public URL of the checkout script
//!   (default: `/assets/orddd-advanced-shipping-compatibility.js`)

use orddd_compat_core::MethodType;
use secrecy::SecretString;
use thiserror::Error;

use crate::enumerator::ExclusionList;

/// Default public URL of the shipped checkout script.
pub const DEFAULT_SCRIPT_URL: &str = "/assets/orddd-advanced-shipping-compatibility.js";

const DEFAULT_EXCLUDED_METHODS: &str = "table_rate,flexible_shipping_ups";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct CompatConfig {
    /// `PostgreSQL` connection URL for the host storage (contains password)
    pub database_url: SecretString,
    /// Method types excluded from fallback-zone synthesis
    pub excluded_methods: Vec<MethodType>,
    /// Public URL the checkout script is served from
    pub script_url: String,
}

impl CompatConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ORDDD_DATABASE_URL")?;
        let excluded_methods = parse_excluded_methods(&get_env_or_default(
            "ORDDD_EXCLUDED_METHODS",
            DEFAULT_EXCLUDED_METHODS,
        ));
        let script_url = get_env_or_default("ORDDD_COMPAT_SCRIPT_URL", DEFAULT_SCRIPT_URL);

        Ok(Self {
            database_url,
            excluded_methods,
            script_url,
        })
    }

    /// The configured exclusions as an [`ExclusionList`].
    #[must_use]
    pub fn exclusion_list(&self) -> ExclusionList {
        ExclusionList::new(self.excluded_methods.clone())
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated exclusion list, dropping empty segments.
fn parse_excluded_methods(raw: &str) -> Vec<MethodType> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(MethodType::new)
        .collect()
}
