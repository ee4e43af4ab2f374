//! CEP route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use cep_clima_core::{CepResult, ZipCodeLookup};

use crate::error::{ApiError, ErrorBody};
use crate::services::lookups::AddLookupError;
use crate::state::AppState;

/// Request body for `POST /cep/lookups`.
#[derive(Debug, Deserialize)]
pub struct AddLookupRequest {
    pub zip_code: String,
}

/// Conflict payload carrying the already-stored record.
#[derive(Debug, Serialize)]
struct ConflictBody {
    #[serde(flatten)]
    error: ErrorBody,
    existing: ZipCodeLookup,
}

/// Resolve a zip code without persisting it.
pub async fn resolve(
    State(state): State<AppState>,
    Path(zip): Path<String>,
) -> Result<Json<CepResult>, ApiError> {
    let result = state.lookups().resolve(&zip).await?;
    Ok(Json(result))
}

/// Resolve and persist a zip code lookup.
///
/// Responds 201 with the stored record, or 409 with the existing
/// record when the zip code was already saved.
pub async fn add_lookup(
    State(state): State<AppState>,
    Json(request): Json<AddLookupRequest>,
) -> Response {
    match state.lookups().add(&request.zip_code).await {
        Ok(lookup) => (StatusCode::CREATED, Json(lookup)).into_response(),
        Err(AddLookupError::AlreadyExists(existing)) => {
            let body = ConflictBody {
                error: ErrorBody::new(format!(
                    "zip code {} is already stored",
                    existing.zip_code
                )),
                existing: *existing,
            };
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        Err(error) => ApiError::from(error).into_response(),
    }
}
