//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DESSERT_HOST` - Bind address (default: 127.0.0.1)
//! - `DESSERT_PORT` - Listen port (default: 3000)
//! - `DESSERT_CATALOG` - Catalog file path or `http(s)` URL (default: data/data.json)
//! - `DESSERT_STORE_PATH` - Local key-value store file (default: .dessert-cart/local-storage.json)
//! - `DESSERT_CART_KEY` - Store entry holding the cart (default: dessertCart)
//! - `DESSERT_ASSETS_DIR` - Directory served under `/assets` (default: assets)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogSource;
use crate::storage::CartStorage;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the product catalog is read from
    pub catalog: CatalogSource,
    /// File backing the local key-value store
    pub store_path: PathBuf,
    /// Store entry holding the cart snapshot
    pub cart_key: String,
    /// Static assets directory (product images, icons, CSS)
    pub assets_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let host = env
            .or_default("DESSERT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DESSERT_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("DESSERT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DESSERT_PORT".to_string(), e.to_string()))?;
        let catalog = CatalogSource::parse(&env.or_default("DESSERT_CATALOG", "data/data.json"));
        let store_path = PathBuf::from(
            env.or_default("DESSERT_STORE_PATH", ".dessert-cart/local-storage.json"),
        );
        let cart_key = env.or_default("DESSERT_CART_KEY", CartStorage::DEFAULT_KEY);
        let assets_dir = PathBuf::from(env.or_default("DESSERT_ASSETS_DIR", "assets"));

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .ok()
            .filter(|rate| (0.0..=1.0).contains(rate))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "SENTRY_SAMPLE_RATE".to_string(),
                    "must be a number between 0.0 and 1.0".to_string(),
                )
            })?;

        Ok(Self {
            host,
            port,
            catalog,
            store_path,
            cart_key,
            assets_dir,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("data/data.json"))
        );
        assert_eq!(config.cart_key, "dessertCart");
        assert_eq!(
            config.store_path,
            PathBuf::from(".dessert-cart/local-storage.json")
        );
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_socket_addr() {
        let config = config_from(&[("DESSERT_HOST", "0.0.0.0"), ("DESSERT_PORT", "8080")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_catalog_url() {
        let config = config_from(&[("DESSERT_CATALOG", "https://cdn.example.com/data.json")]).unwrap();
        assert!(matches!(config.catalog, CatalogSource::Url(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("DESSERT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DESSERT_PORT"));
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(config_from(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(config_from(&[("SENTRY_SAMPLE_RATE", "often")]).is_err());
        let config = config_from(&[("SENTRY_SAMPLE_RATE", "0.25")]).unwrap();
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("DESSERT_CART_KEY", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.cart_key, "dessertCart");
        assert!(config.sentry_dsn.is_none());
    }
}
