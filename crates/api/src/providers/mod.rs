//! External provider adapters.
//!
//! Each adapter wraps one external HTTP API and maps its proprietary
//! response shape into the common domain types. The provider's own
//! "not found" convention maps to `Ok(None)`; anything else that is
//! not a 2xx response, and every transport-level fault, surfaces as a
//! [`ProviderError`] so callers can tell "confirmed absent" apart
//! from "could not determine".

mod brasil_api;
mod open_meteo;
mod via_cep;

pub use brasil_api::BrasilApiClient;
pub use open_meteo::OpenMeteoClient;
pub use via_cep::ViaCepClient;

use async_trait::async_trait;
use thiserror::Error;

use cep_clima_core::{CepProviderId, CepResult, Coordinates, ZipCode};

/// Errors that can occur when calling an external provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level fault (connection failure, timeout,
    /// cancellation).
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a status outside its documented
    /// conventions.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether this failure was an outbound-call timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

/// A single external CEP lookup backend.
///
/// `Ok(None)` means the provider definitively reported the zip code
/// as absent; `Err` means the lookup could not be completed.
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Which backend this adapter wraps.
    fn id(&self) -> CepProviderId;

    /// Look up a zip code against the external API.
    async fn lookup(&self, zip: &ZipCode) -> Result<Option<CepResult>, ProviderError>;
}

/// Raw forecast payload as returned by the weather backend.
///
/// Sections are optional because the provider may omit them; the
/// weather service treats a response missing either section as
/// unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current: Option<CurrentSample>,
    pub daily: Option<DailySeries>,
}

/// Current-conditions sample straight off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSample {
    pub temperature_c: f64,
    /// Relative humidity on the provider's 0-100 percentage scale.
    pub relative_humidity_pct: f64,
    pub apparent_temperature_c: f64,
    /// Observation timestamp as reported by the provider.
    pub time: String,
}

/// Parallel arrays of daily forecast values, one entry per day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temp_max_c: Vec<f64>,
    pub temp_min_c: Vec<f64>,
}

/// A single external weather/geocoding backend.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Tag identifying the backend in produced reports.
    fn tag(&self) -> &'static str;

    /// Fetch a forecast for a coordinate pair.
    ///
    /// `days` is expected to be pre-validated to the 1-7 range by the
    /// caller; the adapter does not re-validate.
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Forecast, ProviderError>;

    /// Resolve a city/state pair to coordinates.
    ///
    /// Returns the first ranked match, or `Ok(None)` when the query
    /// produced no results.
    async fn geocode(
        &self,
        city: &str,
        state: &str,
    ) -> Result<Option<Coordinates>, ProviderError>;
}
