//! Open-Meteo forecast and geocoding client.
//!
//! Both endpoints are keyless. The forecast request asks for the
//! current conditions and daily min/max series used by the weather
//! service; the geocoding request is constrained to a single result
//! so city/state resolution is deterministic.

use serde::Deserialize;
use tracing::{debug, warn};

use cep_clima_core::Coordinates;

use super::{CurrentSample, DailySeries, Forecast, ProviderError, WeatherProvider};

/// Client for the Open-Meteo forecast and geocoding APIs.
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenMeteoClient {
    fn tag(&self) -> &'static str {
        "open-meteo"
    }

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Forecast, ProviderError> {
        debug!(latitude, longitude, days, "querying Open-Meteo forecast");

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,apparent_temperature".to_string(),
                ),
                ("daily", "temperature_2m_max,temperature_2m_min".to_string()),
                ("timezone", "America/Sao_Paulo".to_string()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: ForecastPayload = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(Forecast {
            current: payload.current.map(|c| CurrentSample {
                temperature_c: c.temperature_2m,
                relative_humidity_pct: c.relative_humidity_2m,
                apparent_temperature_c: c.apparent_temperature,
                time: c.time,
            }),
            daily: payload.daily.map(|d| DailySeries {
                time: d.time,
                temp_max_c: d.temperature_2m_max,
                temp_min_c: d.temperature_2m_min,
            }),
        })
    }

    async fn geocode(
        &self,
        city: &str,
        state: &str,
    ) -> Result<Option<Coordinates>, ProviderError> {
        let name = format!("{city}, {state}, Brazil");
        debug!(city, state, "querying Open-Meteo geocoding");

        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", name.as_str()),
                ("count", "1"),
                ("language", "pt"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: GeocodingPayload = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        // Take the first ranked result; Open-Meteo omits the results
        // array entirely when nothing matched
        let Some(first) = payload.results.unwrap_or_default().into_iter().next() else {
            warn!(city, state, "geocoding returned no results");
            return Ok(None);
        };

        debug!(
            city,
            state, first.latitude, first.longitude, "geocoding resolved"
        );

        Ok(Some(Coordinates {
            latitude: first.latitude,
            longitude: first.longitude,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    current: Option<CurrentPayload>,
    daily: Option<DailyPayload>,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodingPayload {
    results: Option<Vec<GeocodingResultPayload>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResultPayload {
    latitude: f64,
    longitude: f64,
}
