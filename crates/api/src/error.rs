//! Unified error handling for the HTTP boundary.
//!
//! Workflows return their own typed errors; this module translates
//! them into `ApiError`, which maps each kind to a status code. All
//! route handlers should return `Result<T, ApiError>`.
//!
//! Upstream and internal faults never expose detail to the client:
//! the response carries a generic message plus an `error_id` that is
//! also written to the log, so support can correlate a report with
//! the underlying fault.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::providers::ProviderError;
use crate::services::lookups::{AddLookupError, ResolveCepError};
use crate::services::weather::GetWeatherError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request from client (malformed zip code, out-of-range day
    /// count).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate zip code on add.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An external provider timed out.
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// An external provider failed.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            Self::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            Self::UpstreamTimeout(detail) => {
                opaque_response(StatusCode::GATEWAY_TIMEOUT, "Upstream provider timed out", &detail)
            }
            Self::UpstreamFailure(detail) => {
                opaque_response(StatusCode::BAD_GATEWAY, "External service error", &detail)
            }
            Self::Internal(detail) => {
                opaque_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", &detail)
            }
        }
    }
}

/// JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// The displayable part of an error payload.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    /// Correlation id for support lookup; only present on opaque
    /// (5xx-class) responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}

impl ErrorBody {
    /// A plain error body with no correlation id.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_id: None,
            },
        }
    }
}

/// Respond with the failure's own message.
fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Respond with a generic message and log the detail under a fresh
/// correlation id.
fn opaque_response(status: StatusCode, message: &str, detail: &str) -> Response {
    let error_id = Uuid::new_v4();
    tracing::error!(%error_id, detail, "request failed");

    let body = ErrorBody {
        error: ErrorDetail {
            message: message.to_string(),
            error_id: Some(error_id.to_string()),
        },
    };
    (status, Json(body)).into_response()
}

/// Split provider faults into timeout vs other transport failure.
fn from_provider(error: ProviderError) -> ApiError {
    if error.is_timeout() {
        ApiError::UpstreamTimeout(error.to_string())
    } else {
        ApiError::UpstreamFailure(error.to_string())
    }
}

impl From<ResolveCepError> for ApiError {
    fn from(error: ResolveCepError) -> Self {
        match error {
            ResolveCepError::InvalidZipCode { .. } => Self::BadRequest(error.to_string()),
            ResolveCepError::NotFound(_) => Self::NotFound(error.to_string()),
            ResolveCepError::Provider(e) => from_provider(e),
        }
    }
}

impl From<AddLookupError> for ApiError {
    fn from(error: AddLookupError) -> Self {
        match error {
            AddLookupError::InvalidZipCode { .. } => Self::BadRequest(error.to_string()),
            // Routes handle the conflict case themselves to attach the
            // existing record; this arm is the message-only fallback
            AddLookupError::AlreadyExists(_) => Self::Conflict(error.to_string()),
            AddLookupError::NotFound(_) => Self::NotFound(error.to_string()),
            AddLookupError::Provider(e) => from_provider(e),
            AddLookupError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<GetWeatherError> for ApiError {
    fn from(error: GetWeatherError) -> Self {
        match error {
            GetWeatherError::InvalidDays(_) => Self::BadRequest(error.to_string()),
            GetWeatherError::NoneSaved => Self::NotFound(
                "No zip codes have been saved yet. Save at least one zip code before requesting weather."
                    .to_string(),
            ),
            GetWeatherError::AllUnavailable => Self::Internal(error.to_string()),
            GetWeatherError::Provider(e) => from_provider(e),
            GetWeatherError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
