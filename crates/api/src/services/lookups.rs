//! Resolve-cep and add-lookup workflows.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use cep_clima_core::{CepResult, ZipCode, ZipCodeError, ZipCodeLookup};

use crate::providers::ProviderError;
use crate::services::cep::CepService;
use crate::store::{LookupStore, StoreError};

/// Actor recorded on lookups created through the API.
const CREATED_BY: &str = "system";

/// Failures of the resolve-cep workflow.
#[derive(Debug, Error)]
pub enum ResolveCepError {
    /// The raw input did not normalize to a valid zip code.
    #[error("invalid zip code {raw:?}: {source}")]
    InvalidZipCode {
        raw: String,
        source: ZipCodeError,
    },

    /// Both providers definitively reported absence.
    #[error("zip code {0:?} was not found on any provider")]
    NotFound(String),

    /// The fallback provider failed (terminal, per the failover
    /// policy).
    #[error(transparent)]
    Provider(ProviderError),
}

/// Failures of the add-lookup workflow.
#[derive(Debug, Error)]
pub enum AddLookupError {
    /// The raw input did not normalize to a valid zip code.
    #[error("invalid zip code {raw:?}: {source}")]
    InvalidZipCode {
        raw: String,
        source: ZipCodeError,
    },

    /// A record for this zip code is already stored; carries the
    /// existing record so the boundary can return its projection.
    #[error("zip code {} is already stored", .0.zip_code)]
    AlreadyExists(Box<ZipCodeLookup>),

    /// Both providers definitively reported absence.
    #[error("zip code {0:?} was not found on any provider")]
    NotFound(String),

    /// The fallback provider failed.
    #[error(transparent)]
    Provider(ProviderError),

    /// The store could not complete a read or the insert.
    #[error("failed to persist lookup: {0}")]
    Store(#[source] StoreError),
}

/// Workflow entry points over CEP resolution and the lookup store.
pub struct LookupService {
    cep: CepService,
    store: Arc<dyn LookupStore>,
}

impl LookupService {
    /// Create the workflow service.
    #[must_use]
    pub fn new(cep: CepService, store: Arc<dyn LookupStore>) -> Self {
        Self { cep, store }
    }

    /// Resolve a raw zip code without persisting anything.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, on confirmed absence from both
    /// providers, or on a fallback provider failure.
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str) -> Result<CepResult, ResolveCepError> {
        let zip = ZipCode::parse(raw).map_err(|source| {
            warn!(raw, %source, "rejected malformed zip code");
            ResolveCepError::InvalidZipCode {
                raw: raw.to_string(),
                source,
            }
        })?;

        self.cep
            .resolve(&zip)
            .await
            .map_err(ResolveCepError::Provider)?
            .ok_or_else(|| ResolveCepError::NotFound(raw.to_string()))
    }

    /// Validate, resolve, and persist a zip code lookup.
    ///
    /// Gates run in order and stop at the first failure; the store is
    /// mutated exactly once on the success path and never on a
    /// failure path.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, an already-stored zip code, confirmed
    /// absence, a fallback provider failure, or a store failure.
    #[instrument(skip(self))]
    pub async fn add(&self, raw: &str) -> Result<ZipCodeLookup, AddLookupError> {
        let zip = ZipCode::parse(raw).map_err(|source| {
            warn!(raw, %source, "rejected malformed zip code");
            AddLookupError::InvalidZipCode {
                raw: raw.to_string(),
                source,
            }
        })?;

        if let Some(existing) = self
            .store
            .find_by_zip(&zip)
            .await
            .map_err(AddLookupError::Store)?
        {
            warn!(%zip, "zip code already stored");
            return Err(AddLookupError::AlreadyExists(Box::new(existing)));
        }

        let result = self
            .cep
            .resolve(&zip)
            .await
            .map_err(AddLookupError::Provider)?
            .ok_or_else(|| {
                warn!(%zip, "zip code not found on any provider");
                AddLookupError::NotFound(raw.to_string())
            })?;

        let lookup = ZipCodeLookup::from_cep_result(result, CREATED_BY);

        match self.store.add(lookup.clone()).await {
            Ok(()) => {
                info!(%zip, provider = %lookup.provider, "zip code lookup persisted");
                Ok(lookup)
            }
            Err(StoreError::Duplicate(_)) => {
                // Lost a race with a concurrent add; surface the
                // winner's record like the pre-check does
                match self
                    .store
                    .find_by_zip(&zip)
                    .await
                    .map_err(AddLookupError::Store)?
                {
                    Some(existing) => Err(AddLookupError::AlreadyExists(Box::new(existing))),
                    None => Err(AddLookupError::Store(StoreError::Duplicate(zip))),
                }
            }
            Err(error) => {
                warn!(%zip, %error, "failed to persist lookup");
                Err(AddLookupError::Store(error))
            }
        }
    }
}
