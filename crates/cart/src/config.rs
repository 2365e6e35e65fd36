//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CART_API_URL` - Base URL of the store API (default: `http://localhost:3333`)
//! - `CART_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `CART_STORAGE_PATH` - File used as local storage (default: `rocketshoes-storage.json`)
//! - `CART_STORAGE_KEY` - Key the cart snapshot is stored under (default: `@RocketShoes:cart`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default base URL of the store API.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Default key the cart snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_STORAGE_PATH: &str = "rocketshoes-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Store API configuration
    pub api: ApiConfig,
    /// Local storage configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Store API (stock and product lookups) configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

/// Local key-value storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file backing the store
    pub path: PathBuf,
    /// Key holding the cart snapshot
    pub cart_key: String,
}

impl CartConfig {
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
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        Ok(Self {
            api: ApiConfig::from_env(&env)?,
            storage: StorageConfig::from_env(&env),
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }
}

impl ApiConfig {
    /// Create an API configuration with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw_url = env.or_default("CART_API_URL", DEFAULT_API_URL);
        let base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CART_API_URL".to_string(), e))?;

        let timeout_secs = env
            .or_default("CART_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CART_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CART_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl StorageConfig {
    fn from_env(env: &Env<'_>) -> Self {
        Self {
            path: PathBuf::from(env.or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH)),
            cart_key: env.or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup wrapper so loading can be tested without touching the
/// process environment.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse the API base URL and make sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    // `Url::join` drops the last path segment unless it ends with a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CartConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CartConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert_eq!(config.storage.path, PathBuf::from("rocketshoes-storage.json"));
        assert_eq!(config.storage.cart_key, "@RocketShoes:cart");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CART_API_URL", "https://api.example.com/v1"),
            ("CART_API_TIMEOUT_SECS", "3"),
            ("CART_STORAGE_PATH", "/tmp/cart.json"),
            ("CART_STORAGE_KEY", "@Test:cart"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.api.timeout, Duration::from_secs(3));
        assert_eq!(config.storage.path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.storage.cart_key, "@Test:cart");
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = load(&[("CART_STORAGE_KEY", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.storage.cart_key, DEFAULT_STORAGE_KEY);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_url() {
        let err = load(&[("CART_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CART_API_URL"));

        let err = load(&[("CART_API_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(load(&[("CART_API_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("CART_API_TIMEOUT_SECS", "0")]).is_err());
    }
}
