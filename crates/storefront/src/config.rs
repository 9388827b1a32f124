//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_NAME` - Shop title shown above the catalog (default: ☕ Кружки.ру)
//! - `STOREFRONT_CATALOG` - Path to a JSON catalog file (default: built-in mugs)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `RUST_LOG` - Log filter (default: `kruzhki_storefront=info,kruzhki_core=info`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_SHOP_NAME: &str = "☕ Кружки.ру";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Shop title shown above the catalog
    pub shop_name: String,
    /// JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            catalog_path: None,
            log_format: LogFormat::default(),
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
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shop_name = non_empty(lookup("STOREFRONT_NAME"))
            .unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string());
        let catalog_path = non_empty(lookup("STOREFRONT_CATALOG")).map(PathBuf::from);
        let log_format = match non_empty(lookup("STOREFRONT_LOG_FORMAT")) {
            Some(value) => value.parse::<LogFormat>().map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_LOG_FORMAT".to_string(), e)
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            shop_name,
            catalog_path,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Treat blank variables as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
