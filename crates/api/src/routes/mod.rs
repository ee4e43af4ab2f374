//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health            - Liveness check
//!
//! # CEP
//! GET  /cep/{zip}         - Resolve a zip code (no persistence)
//! POST /cep/lookups       - Resolve and persist a zip code lookup
//!
//! # Weather
//! GET  /weather?days=N    - Forecasts for every saved lookup
//! ```

pub mod cep;
pub mod weather;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Create the CEP routes router.
pub fn cep_routes() -> Router<AppState> {
    Router::new()
        .route("/{zip}", get(cep::resolve))
        .route("/lookups", post(cep::add_lookup))
}

/// Create the weather routes router.
pub fn weather_routes() -> Router<AppState> {
    Router::new().route("/", get(weather::get_weather))
}

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/cep", cep_routes())
        .nest("/weather", weather_routes())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
