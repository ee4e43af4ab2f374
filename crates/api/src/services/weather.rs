//! Cached weather retrieval and the saved-lookups aggregation
//! workflow.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use cep_clima_core::{
    Coordinates, CurrentConditions, DailyForecast, WeatherLocation, WeatherReport,
};

use crate::providers::{Forecast, ProviderError, WeatherProvider};
use crate::store::{LookupStore, StoreError};

/// Smallest accepted forecast window.
pub const MIN_FORECAST_DAYS: u8 = 1;
/// Largest accepted forecast window.
pub const MAX_FORECAST_DAYS: u8 = 7;

/// Failures of the get-weather workflow.
#[derive(Debug, Error)]
pub enum GetWeatherError {
    /// The requested day count is outside the accepted window.
    #[error("days must be between 1 and 7, got {0}")]
    InvalidDays(u8),

    /// Nothing has been saved yet, so there is nothing to forecast.
    #[error("no zip codes have been saved yet")]
    NoneSaved,

    /// Every saved lookup was attempted and none produced a forecast.
    #[error("no forecast could be retrieved for any saved zip code")]
    AllUnavailable,

    /// The weather provider failed mid-aggregation.
    #[error(transparent)]
    Provider(ProviderError),

    /// The saved lookups could not be read.
    #[error("failed to read saved lookups: {0}")]
    Store(#[source] StoreError),
}

/// Forecast retrieval with a short-lived cache in front of the
/// provider.
///
/// Cache entries expire a fixed duration after they were written
/// (absolute, not sliding) and are returned unchanged on a hit, so a
/// caller can observe the original observation timestamp of a cached
/// report.
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Cache<String, WeatherReport>,
}

impl WeatherService {
    /// Create the service with the given cache TTL.
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1024)
            .time_to_live(cache_ttl)
            .build();

        Self { provider, cache }
    }

    /// Fetch a forecast for a coordinate pair.
    ///
    /// Returns `Ok(None)` when the provider's response is unusable
    /// (missing current or daily section); such responses are never
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns the provider's error on a transport or protocol fault.
    #[instrument(skip(self))]
    pub async fn by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Option<WeatherReport>, ProviderError> {
        let key = format!("weather:{latitude}:{longitude}:{days}");
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key, "forecast served from cache");
            return Ok(Some(cached));
        }

        let forecast = self.provider.forecast(latitude, longitude, days).await?;
        let Some(report) = self.map_forecast(&forecast, latitude, longitude, days) else {
            warn!(
                latitude,
                longitude, "provider response missing current or daily section"
            );
            return Ok(None);
        };

        self.cache.insert(key, report.clone()).await;
        info!(latitude, longitude, days, "forecast retrieved and cached");
        Ok(Some(report))
    }

    /// Fetch a forecast for a city/state pair via geocoding.
    ///
    /// On success the returned location carries the requested city and
    /// state labels, not the geocoder's own place name.
    ///
    /// # Errors
    ///
    /// Returns the provider's error on a transport or protocol fault.
    #[instrument(skip(self))]
    pub async fn by_city(
        &self,
        city: &str,
        state: &str,
        days: u8,
    ) -> Result<Option<WeatherReport>, ProviderError> {
        let key = format!("weather:{city}:{state}:{days}");
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key, "forecast served from cache");
            return Ok(Some(cached));
        }

        let Some(coordinates) = self.geocode(city, state).await? else {
            warn!(city, state, "could not geocode city/state pair");
            return Ok(None);
        };

        let Some(mut report) = self
            .by_coordinates(coordinates.latitude, coordinates.longitude, days)
            .await?
        else {
            return Ok(None);
        };

        report.location.city = Some(city.to_string());
        report.location.state = Some(state.to_string());

        self.cache.insert(key, report.clone()).await;
        Ok(Some(report))
    }

    /// Resolve a city/state pair to coordinates.
    ///
    /// # Errors
    ///
    /// Returns the provider's error on a transport or protocol fault.
    pub async fn geocode(
        &self,
        city: &str,
        state: &str,
    ) -> Result<Option<Coordinates>, ProviderError> {
        self.provider.geocode(city, state).await
    }

    /// Produce a forecast for every saved lookup, newest first.
    ///
    /// Lookups with stored coordinates are queried directly; the rest
    /// go through geocoding by their stored city/state. A lookup whose
    /// forecast comes back absent is logged and skipped; a provider
    /// fault aborts the whole aggregation.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range day count, an empty store, a store
    /// read failure, a provider fault, or when every single lookup
    /// failed to produce a forecast.
    #[instrument(skip(self, store))]
    pub async fn for_saved_lookups(
        &self,
        store: &dyn LookupStore,
        days: u8,
    ) -> Result<Vec<WeatherReport>, GetWeatherError> {
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(GetWeatherError::InvalidDays(days));
        }

        let mut lookups = store.all().await.map_err(GetWeatherError::Store)?;
        if lookups.is_empty() {
            warn!("no saved lookups to forecast");
            return Err(GetWeatherError::NoneSaved);
        }

        // Most recently saved first; this ordering is part of the
        // response contract
        lookups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        info!(count = lookups.len(), "forecasting saved lookups");

        let mut reports = Vec::with_capacity(lookups.len());
        for lookup in &lookups {
            let report = match lookup.location {
                Some(coordinates) => {
                    self.by_coordinates(coordinates.latitude, coordinates.longitude, days)
                        .await
                }
                None => self.by_city(&lookup.city, &lookup.state, days).await,
            }
            .map_err(GetWeatherError::Provider)?;

            match report {
                Some(mut report) => {
                    report.source_lookup_id = Some(lookup.id);
                    report.location.city = Some(lookup.city.clone());
                    report.location.state = Some(lookup.state.clone());
                    reports.push(report);
                }
                None => {
                    warn!(zip = %lookup.zip_code, "no forecast available for saved lookup, skipping");
                }
            }
        }

        if reports.is_empty() {
            warn!("every saved lookup failed to produce a forecast");
            return Err(GetWeatherError::AllUnavailable);
        }

        Ok(reports)
    }

    /// Map a raw provider forecast into a report.
    ///
    /// Returns `None` when either section is missing. Humidity comes
    /// in on a 0-100 scale and leaves on a 0-1 scale; daily entries
    /// are truncated to what the provider returned, never padded.
    fn map_forecast(
        &self,
        forecast: &Forecast,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Option<WeatherReport> {
        let current = forecast.current.as_ref()?;
        let daily = forecast.daily.as_ref()?;

        let observed_at = parse_observation_time(&current.time).unwrap_or_else(Utc::now);

        let take = usize::from(days).min(daily.time.len());
        let entries = daily
            .time
            .iter()
            .take(take)
            .enumerate()
            .map(|(i, date)| DailyForecast {
                date: date.clone(),
                temp_min_c: daily.temp_min_c.get(i).copied().unwrap_or_default(),
                temp_max_c: daily.temp_max_c.get(i).copied().unwrap_or_default(),
            })
            .collect();

        Some(WeatherReport {
            source_lookup_id: None,
            location: WeatherLocation {
                latitude,
                longitude,
                city: None,
                state: None,
            },
            current: CurrentConditions {
                temperature_c: current.temperature_c,
                humidity: current.relative_humidity_pct / 100.0,
                apparent_temperature_c: current.apparent_temperature_c,
                observed_at,
            },
            daily: entries,
            provider: self.provider.tag().to_string(),
        })
    }
}

/// Parse the provider's observation timestamp.
///
/// Open-Meteo reports minute resolution without an offset; seconds
/// show up on some endpoints, so both forms are accepted.
fn parse_observation_time(time: &str) -> Option<chrono::DateTime<Utc>> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|t| t.and_utc())
}
