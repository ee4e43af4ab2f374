//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::providers::{BrasilApiClient, OpenMeteoClient, ViaCepClient};
use crate::services::{CepService, LookupService, WeatherService};
use crate::store::{LookupStore, MemoryLookupStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc` and provides access to the workflow
/// services and the lookup store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: Arc<dyn LookupStore>,
    lookups: LookupService,
    weather: WeatherService,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// Wires the provider adapters onto a shared HTTP client and
    /// binds BrasilAPI as the primary CEP provider with ViaCEP as the
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.providers.request_timeout)
            .build()?;

        let primary = Arc::new(BrasilApiClient::new(
            http.clone(),
            config.providers.brasil_api_base_url.clone(),
        ));
        let fallback = Arc::new(ViaCepClient::new(
            http.clone(),
            config.providers.via_cep_base_url.clone(),
        ));
        let cep = CepService::new(primary, fallback);

        let store: Arc<dyn LookupStore> = Arc::new(MemoryLookupStore::new());
        let lookups = LookupService::new(cep, Arc::clone(&store));

        let weather_provider = Arc::new(OpenMeteoClient::new(
            http,
            config.providers.open_meteo_forecast_url.clone(),
            config.providers.open_meteo_geocoding_url.clone(),
        ));
        let weather = WeatherService::new(weather_provider, config.weather_cache_ttl);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                lookups,
                weather,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the lookup store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn LookupStore> {
        &self.inner.store
    }

    /// Get a reference to the lookup workflow service.
    #[must_use]
    pub fn lookups(&self) -> &LookupService {
        &self.inner.lookups
    }

    /// Get a reference to the weather service.
    #[must_use]
    pub fn weather(&self) -> &WeatherService {
        &self.inner.weather
    }
}
