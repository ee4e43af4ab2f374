//! Weather report projection types.
//!
//! A [`WeatherReport`] is always a live projection: it is cached for a
//! short TTL but never persisted, and is identical in shape whether
//! the location came from stored coordinates or from geocoding a
//! city/state pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::lookup::LookupId;

/// Where a forecast applies.
///
/// City/state labels are optional; when the report is produced for a
/// saved lookup they are overwritten with the stored labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Current-conditions snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    /// Relative humidity as a 0-1 fraction.
    pub humidity: f64,
    pub apparent_temperature_c: f64,
    pub observed_at: DateTime<Utc>,
}

/// One day of forecast minima/maxima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO 8601 calendar date.
    pub date: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

/// A forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Identity of the saved lookup this report was produced for,
    /// once attached by the aggregation workflow.
    pub source_lookup_id: Option<LookupId>,
    pub location: WeatherLocation,
    pub current: CurrentConditions,
    /// Daily entries in chronological order, truncated to what the
    /// provider actually returned.
    pub daily: Vec<DailyForecast>,
    /// Which backend produced this report.
    pub provider: String,
}
