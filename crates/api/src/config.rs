//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to production defaults:
//!
//! - `CEP_CLIMA_HOST` - Bind address (default: 127.0.0.1)
//! - `CEP_CLIMA_PORT` - Listen port (default: 8080)
//! - `BRASIL_API_BASE_URL` - BrasilAPI CEP endpoint base
//! - `VIA_CEP_BASE_URL` - ViaCEP endpoint base
//! - `OPEN_METEO_FORECAST_URL` - Open-Meteo forecast endpoint
//! - `OPEN_METEO_GEOCODING_URL` - Open-Meteo geocoding endpoint
//! - `PROVIDER_TIMEOUT_SECS` - Outbound HTTP timeout (default: 10)
//! - `WEATHER_CACHE_TTL_SECS` - Forecast cache TTL (default: 600)
//!
//! Base URLs are configurable so tests can point the adapters at a
//! local mock server.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// External provider endpoints and HTTP client settings
    pub providers: ProviderConfig,
    /// Absolute TTL for cached weather reports
    pub weather_cache_ttl: Duration,
}

/// External provider endpoint configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// BrasilAPI CEP v2 base URL (primary CEP provider)
    pub brasil_api_base_url: String,
    /// ViaCEP base URL (fallback CEP provider)
    pub via_cep_base_url: String,
    /// Open-Meteo forecast endpoint
    pub open_meteo_forecast_url: String,
    /// Open-Meteo geocoding endpoint
    pub open_meteo_geocoding_url: String,
    /// Timeout applied to every outbound provider call
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed
    /// (unparseable address, port, duration, or URL).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CEP_CLIMA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CEP_CLIMA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CEP_CLIMA_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CEP_CLIMA_PORT".to_string(), e.to_string()))?;

        let providers = ProviderConfig::from_env()?;
        let weather_cache_ttl =
            Duration::from_secs(get_env_secs("WEATHER_CACHE_TTL_SECS", "600")?);

        Ok(Self {
            host,
            port,
            providers,
            weather_cache_ttl,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            brasil_api_base_url: get_base_url(
                "BRASIL_API_BASE_URL",
                "https://brasilapi.com.br/api/cep/v2",
            )?,
            via_cep_base_url: get_base_url("VIA_CEP_BASE_URL", "https://viacep.com.br/ws")?,
            open_meteo_forecast_url: get_base_url(
                "OPEN_METEO_FORECAST_URL",
                "https://api.open-meteo.com/v1/forecast",
            )?,
            open_meteo_geocoding_url: get_base_url(
                "OPEN_METEO_GEOCODING_URL",
                "https://geocoding-api.open-meteo.com/v1/search",
            )?,
            request_timeout: Duration::from_secs(get_env_secs("PROVIDER_TIMEOUT_SECS", "10")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a whole-seconds duration variable.
fn get_env_secs(key: &str, default: &str) -> Result<u64, ConfigError> {
    get_env_or_default(key, default)
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get a base URL variable, validating that it parses as a URL.
///
/// Trailing slashes are trimmed so adapters can join path segments
/// with a plain `/`.
fn get_base_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let raw = get_env_or_default(key, default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(raw.trim_end_matches('/').to_string())
}
