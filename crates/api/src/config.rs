//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. Timeout, TTL and rate limit must be at least 1.
//! - `BREEDBOOK_HOST` - Bind address (default: 127.0.0.1)
//! - `BREEDBOOK_PORT` - Listen port (default: 3000)
//! - `DOG_API_BASE_URL` - dog.ceo API root (default: <https://dog.ceo/api>)
//! - `DOG_API_TIMEOUT_SECS` - Per-request upstream timeout (default: 10)
//! - `CATALOG_TTL_SECS` - How long a breed catalog snapshot stays fresh (default: 300)
//! - `FAVORITES_PATH` - JSON file holding favorite breeds (default: favorites.json)
//! - `RATE_LIMIT_PER_MINUTE` - Requests per minute per client IP (default: 30)
//! - `CORS_ALLOWED_ORIGIN` - Origin allowed to call the API from a browser
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default dog.ceo API root.
pub const DEFAULT_DOG_API_BASE_URL: &str = "https://dog.ceo/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream dog.ceo API configuration
    pub dog_api: DogApiConfig,
    /// Breed catalog cache configuration
    pub catalog: CatalogConfig,
    /// Favorites persistence configuration
    pub favorites: FavoritesConfig,
    /// Requests per minute allowed per client IP
    pub rate_limit_per_minute: u32,
    /// Browser origin allowed by CORS, if any
    pub cors_allowed_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Upstream dog.ceo API configuration.
#[derive(Debug, Clone)]
pub struct DogApiConfig {
    /// API root; endpoint paths are appended to it
    pub base_url: Url,
    /// Fixed per-request timeout
    pub timeout: Duration,
}

/// Breed catalog cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct CatalogConfig {
    /// Maximum age of a snapshot before it is refetched
    pub ttl: Duration,
}

/// Favorites persistence configuration.
#[derive(Debug, Clone)]
pub struct FavoritesConfig {
    /// Path of the JSON record
    pub path: PathBuf,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("BREEDBOOK_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("BREEDBOOK_PORT", "3000")?;
        let rate_limit_per_minute: u32 = parse_nonzero_env_or_default("RATE_LIMIT_PER_MINUTE", "30")?;

        Ok(Self {
            host,
            port,
            dog_api: DogApiConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            favorites: FavoritesConfig::from_env(),
            rate_limit_per_minute,
            cors_allowed_origin: get_optional_env("CORS_ALLOWED_ORIGIN"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DogApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("DOG_API_BASE_URL", DEFAULT_DOG_API_BASE_URL);
        let base_url = parse_base_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("DOG_API_BASE_URL".to_string(), e))?;
        let timeout_secs: u64 = parse_nonzero_env_or_default("DOG_API_TIMEOUT_SECS", "10")?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs: u64 = parse_nonzero_env_or_default("CATALOG_TTL_SECS", "300")?;
        Ok(Self {
            ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

impl FavoritesConfig {
    fn from_env() -> Self {
        Self {
            path: PathBuf::from(get_env_or_default("FAVORITES_PATH", "favorites.json")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Like [`parse_env_or_default`], rejecting zero.
fn parse_nonzero_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    parse_nonzero(key, &get_env_or_default(key, default))
}

fn parse_nonzero<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let value: T = parse_value(key, raw)?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}

/// Parse the upstream root, requiring an http(s) URL.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_port() {
        let port: u16 = parse_value("BREEDBOOK_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_trims_whitespace() {
        let secs: u64 = parse_value("CATALOG_TTL_SECS", " 60 ").unwrap();
        assert_eq!(secs, 60);
    }

    #[test]
    fn test_parse_value_invalid() {
        let result: Result<u16, _> = parse_value("BREEDBOOK_PORT", "not-a-port");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BREEDBOOK_PORT"));
    }

    #[test]
    fn test_parse_value_host() {
        let host: IpAddr = parse_value("BREEDBOOK_HOST", "0.0.0.0").unwrap();
        assert_eq!(host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_parse_nonzero_rejects_zero() {
        for key in ["DOG_API_TIMEOUT_SECS", "CATALOG_TTL_SECS"] {
            let err = parse_nonzero::<u64>(key, "0").unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == key));
        }
        let err = parse_nonzero::<u32>("RATE_LIMIT_PER_MINUTE", " 0 ").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "RATE_LIMIT_PER_MINUTE"));
    }

    #[test]
    fn test_parse_nonzero_accepts_positive() {
        let secs: u64 = parse_nonzero("DOG_API_TIMEOUT_SECS", "10").unwrap();
        assert_eq!(secs, 10);
        let per_minute: u32 = parse_nonzero("RATE_LIMIT_PER_MINUTE", "30").unwrap();
        assert_eq!(per_minute, 30);
        assert!(parse_nonzero::<u64>("CATALOG_TTL_SECS", "soon").is_err());
    }

    #[test]
    fn test_parse_base_url_accepts_http_and_https() {
        assert!(parse_base_url("https://dog.ceo/api").is_ok());
        assert!(parse_base_url("http://127.0.0.1:9000").is_ok());
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://dog.ceo/api").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_default_base_url_parses() {
        let url = parse_base_url(DEFAULT_DOG_API_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("dog.ceo"));
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_catalog_default_ttl_is_five_minutes() {
        assert_eq!(CatalogConfig::default().ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            dog_api: DogApiConfig {
                base_url: Url::parse(DEFAULT_DOG_API_BASE_URL).unwrap(),
                timeout: Duration::from_secs(10),
            },
            catalog: CatalogConfig::default(),
            favorites: FavoritesConfig {
                path: PathBuf::from("favorites.json"),
            },
            rate_limit_per_minute: 30,
            cors_allowed_origin: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
