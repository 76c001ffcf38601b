//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `NP_CART_STORE_DIR` - Directory holding the persisted cart (default: `.np-cart`)
//! - `NP_CART_STORAGE_KEY` - Key the cart is stored under (default: `cart`)
//! - `NP_CART_QUOTA_BYTES` - Reject cart writes larger than this many bytes
//! - `NP_CART_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Tracing filter (default: `np_cart=info,pineapple_cart=info`)

use std::path::PathBuf;
use std::str::FromStr;

use pineapple_cart::persistence::DEFAULT_STORAGE_KEY;
use thiserror::Error;

const DEFAULT_STORE_DIR: &str = ".np-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory of the file-backed key-value store
    pub store_dir: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Maximum size of a single cart write
    pub quota_bytes: Option<usize>,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
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

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_dir = PathBuf::from(
            get("NP_CART_STORE_DIR").unwrap_or_else(|| DEFAULT_STORE_DIR.to_string()),
        );

        let storage_key =
            get("NP_CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "NP_CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let quota_bytes = get("NP_CART_QUOTA_BYTES")
            .map(|value| {
                value.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("NP_CART_QUOTA_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let log_format = get("NP_CART_LOG_FORMAT")
            .map(|value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|e| ConfigError::InvalidEnvVar("NP_CART_LOG_FORMAT".to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            store_dir,
            storage_key,
            quota_bytes,
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store_dir, PathBuf::from(".np-cart"));
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.quota_bytes, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("NP_CART_STORE_DIR", "/tmp/carts"),
            ("NP_CART_STORAGE_KEY", "np_cart"),
            ("NP_CART_QUOTA_BYTES", "5000"),
            ("NP_CART_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "np_cart");
        assert_eq!(config.quota_bytes, Some(5000));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("NP_CART_QUOTA_BYTES", "lots")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "NP_CART_QUOTA_BYTES"
        ));
        assert!(matches!(
            load(&[("NP_CART_LOG_FORMAT", "xml")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "NP_CART_LOG_FORMAT"
        ));
        assert!(matches!(
            load(&[("NP_CART_STORAGE_KEY", " ")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "NP_CART_STORAGE_KEY"
        ));
    }
}
