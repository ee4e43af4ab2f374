//! BrasilAPI CEP client (primary provider).
//!
//! Wraps the BrasilAPI CEP v2 endpoint. This is the only CEP backend
//! that supplies geographic coordinates, and only for part of its
//! dataset, so the mapped result's location stays optional.

use serde::Deserialize;
use tracing::{debug, warn};

use cep_clima_core::{CepProviderId, CepResult, Coordinates, ZipCode};

use super::{CepProvider, ProviderError};

/// Client for the BrasilAPI CEP v2 API.
#[derive(Clone)]
pub struct BrasilApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl BrasilApiClient {
    /// Create a new BrasilAPI client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CepProvider for BrasilApiClient {
    fn id(&self) -> CepProviderId {
        CepProviderId::BrasilApi
    }

    async fn lookup(&self, zip: &ZipCode) -> Result<Option<CepResult>, ProviderError> {
        let url = format!("{}/{}", self.base_url, zip);
        debug!(%zip, "querying BrasilAPI");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        // BrasilAPI signals an unknown CEP with a plain 404
        if status == reqwest::StatusCode::NOT_FOUND {
            warn!(%zip, "zip code not found on BrasilAPI");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: BrasilApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        debug!(%zip, "zip code found on BrasilAPI");

        Ok(Some(CepResult {
            zip_code: zip.clone(),
            street: payload.street,
            district: payload.neighborhood,
            city: payload.city,
            state: payload.state,
            ibge: payload.ibge,
            location: payload
                .location
                .and_then(|l| l.coordinates)
                .and_then(BrasilApiCoordinates::into_coordinates),
            provider: CepProviderId::BrasilApi,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct BrasilApiResponse {
    street: Option<String>,
    neighborhood: Option<String>,
    city: String,
    state: String,
    ibge: Option<String>,
    location: Option<BrasilApiLocation>,
}

#[derive(Debug, Deserialize)]
struct BrasilApiLocation {
    coordinates: Option<BrasilApiCoordinates>,
}

/// BrasilAPI serves coordinates as JSON strings on most CEPs and as
/// numbers on a few, so both forms are accepted. Records without a
/// usable pair simply yield no location.
#[derive(Debug, Deserialize)]
struct BrasilApiCoordinates {
    latitude: Option<Coordinate>,
    longitude: Option<Coordinate>,
}

impl BrasilApiCoordinates {
    fn into_coordinates(self) -> Option<Coordinates> {
        let latitude = self.latitude.as_ref().and_then(Coordinate::as_f64)?;
        let longitude = self.longitude.as_ref().and_then(Coordinate::as_f64)?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_both_wire_forms() {
        let text: Coordinate = serde_json::from_str("\"-23.55\"").unwrap();
        assert_eq!(text.as_f64(), Some(-23.55));

        let number: Coordinate = serde_json::from_str("-23.55").unwrap();
        assert_eq!(number.as_f64(), Some(-23.55));
    }

    #[test]
    fn test_unparseable_coordinate_drops_location() {
        let coords = BrasilApiCoordinates {
            latitude: Some(Coordinate::Text("not-a-number".to_string())),
            longitude: Some(Coordinate::Number(-46.63)),
        };
        assert!(coords.into_coordinates().is_none());
    }

    #[test]
    fn test_missing_half_drops_location() {
        let coords = BrasilApiCoordinates {
            latitude: Some(Coordinate::Number(-23.55)),
            longitude: None,
        };
        assert!(coords.into_coordinates().is_none());
    }
}
