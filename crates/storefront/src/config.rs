//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `OWNIT_DATA_DIR` - Directory for persisted session state (default: `./data`)
//! - `OWNIT_CATALOG_PATH` - Catalog JSON file; the embedded seed is used when unset
//! - `OWNIT_CURRENCY` - ISO 4217 display currency (default: `USD`)

use std::path::PathBuf;

use thiserror::Error;

use ownit_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory where cart and wishlist blobs are persisted
    pub data_dir: PathBuf,
    /// Catalog document to load instead of the embedded seed
    pub catalog_path: Option<PathBuf>,
    /// Display currency for prices
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            catalog_path: None,
            currency: CurrencyCode::USD,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("OWNIT_DATA_DIR", "./data"));
        let catalog_path = get_optional_env("OWNIT_CATALOG_PATH").map(PathBuf::from);
        let currency = match get_optional_env("OWNIT_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("OWNIT_CURRENCY".to_string(), e))?,
            None => CurrencyCode::USD,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
