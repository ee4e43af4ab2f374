//! Persisted zip code lookup entity.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::cep::{CepResult, Coordinates};
use crate::types::provider::CepProviderId;
use crate::types::zip_code::ZipCode;

/// Type-safe identity of a persisted [`ZipCodeLookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupId(Uuid);

impl LookupId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LookupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for LookupId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A persisted, accepted CEP lookup.
///
/// At most one record exists per zip code (the store enforces the
/// unique constraint). Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipCodeLookup {
    pub id: LookupId,
    pub zip_code: ZipCode,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub state: String,
    pub ibge: Option<String>,
    pub location: Option<Coordinates>,
    /// Which backend the fields were resolved from.
    pub provider: CepProviderId,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl ZipCodeLookup {
    /// Build a new lookup record from a resolved [`CepResult`].
    ///
    /// Allocates a fresh [`LookupId`] and stamps the current UTC time.
    #[must_use]
    pub fn from_cep_result(result: CepResult, created_by: impl Into<String>) -> Self {
        Self {
            id: LookupId::new(),
            zip_code: result.zip_code,
            street: result.street,
            district: result.district,
            city: result.city,
            state: result.state,
            ibge: result.ibge,
            location: result.location,
            provider: result.provider,
            created_at: Utc::now(),
            created_by: created_by.into(),
        }
    }
}
