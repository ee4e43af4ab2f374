//! Weather route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use cep_clima_core::WeatherReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// Forecast window in days (1-7, defaults to 3).
    #[serde(default = "default_days")]
    pub days: u8,
}

const fn default_days() -> u8 {
    3
}

/// Produce forecasts for every saved lookup, newest first.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherReport>>, ApiError> {
    let reports = state
        .weather()
        .for_saved_lookups(state.store().as_ref(), query.days)
        .await?;
    Ok(Json(reports))
}
