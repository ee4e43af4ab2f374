//! CEP resolution result types.

use serde::{Deserialize, Serialize};

use crate::types::provider::CepProviderId;
use crate::types::zip_code::ZipCode;

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The normalized outcome of a successful CEP lookup.
///
/// Produced fresh on every provider call and never cached or mutated.
/// `location` is only ever present for providers that supply
/// coordinates (BrasilAPI does, ViaCEP never does).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CepResult {
    pub zip_code: ZipCode,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub state: String,
    /// IBGE municipality code, when the provider supplies one.
    pub ibge: Option<String>,
    pub location: Option<Coordinates>,
    /// Which backend produced this result.
    pub provider: CepProviderId,
}
