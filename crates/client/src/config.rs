//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `SHOPFRONT_API_URL` - Product API base URL (default: <https://interview-api.kodecreators.com/api>)
//! - `SHOPFRONT_PER_PAGE` - Products requested per listing page (default: 10)
//! - `SHOPFRONT_CATALOG_PAGE_SIZE` - Products shown per catalog page (default: 12)
//! - `SHOPFRONT_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 30)
//! - `SHOPFRONT_DEMO_LOGIN` - Accept the built-in `admin`/`admin` login (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::{NonZeroU32, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;

use shopfront_core::catalog::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

/// Default product API base URL.
pub const DEFAULT_API_URL: &str = "https://interview-api.kodecreators.com/api";

/// Default number of products requested per listing page.
pub const DEFAULT_PER_PAGE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Product API base URL
    pub api_url: Url,
    /// Products requested per listing page
    pub per_page: NonZeroU32,
    /// Products shown per catalog page
    pub catalog_page_size: NonZeroUsize,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Whether `admin`/`admin` logs in locally without a network call
    pub demo_login: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the API URL.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            per_page: DEFAULT_PER_PAGE,
            catalog_page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            demo_login: true,
            sentry_dsn: None,
            sentry_environment: None,
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let api_url = env.or_default("SHOPFRONT_API_URL", DEFAULT_API_URL);
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), e.to_string())
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_API_URL".to_string(),
                format!("unsupported scheme '{}'", api_url.scheme()),
            ));
        }

        let per_page = env.parse_or("SHOPFRONT_PER_PAGE", DEFAULT_PER_PAGE)?;
        let catalog_page_size = env.parse_or("SHOPFRONT_CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let timeout_secs = env.parse_or("SHOPFRONT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let demo_login = env.parse_or("SHOPFRONT_DEMO_LOGIN", true)?;

        Ok(Self {
            api_url,
            per_page,
            catalog_page_size,
            timeout: Duration::from_secs(timeout_secs),
            demo_login,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Absolute URL for an API path such as `products/list`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
