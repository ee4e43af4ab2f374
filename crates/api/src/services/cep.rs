//! CEP resolution with primary/fallback failover.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use cep_clima_core::{CepResult, ZipCode};

use crate::providers::{CepProvider, ProviderError};

/// Resolves CEPs against an ordered pair of providers.
///
/// The pair is a static assignment made at construction; both
/// bindings are required, so a missing provider is unrepresentable.
///
/// Failure handling is deliberately asymmetric: a primary failure is
/// recoverable via the fallback, while a fallback failure is terminal
/// because no further provider exists.
#[derive(Clone)]
pub struct CepService {
    primary: Arc<dyn CepProvider>,
    fallback: Arc<dyn CepProvider>,
}

impl CepService {
    /// Create a resolution service over an explicit provider pair.
    #[must_use]
    pub fn new(primary: Arc<dyn CepProvider>, fallback: Arc<dyn CepProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Resolve a zip code.
    ///
    /// Returns `Ok(None)` only when both providers definitively
    /// reported absence.
    ///
    /// # Errors
    ///
    /// Returns the fallback provider's error when it fails; primary
    /// failures are logged and absorbed.
    #[instrument(skip(self), fields(zip = %zip))]
    pub async fn resolve(&self, zip: &ZipCode) -> Result<Option<CepResult>, ProviderError> {
        match self.primary.lookup(zip).await {
            Ok(Some(result)) => {
                info!(provider = %self.primary.id(), "zip code resolved by primary provider");
                return Ok(Some(result));
            }
            Ok(None) => {
                warn!(provider = %self.primary.id(), "primary provider reported zip code absent, trying fallback");
            }
            Err(error) => {
                warn!(provider = %self.primary.id(), %error, "primary provider failed, trying fallback");
            }
        }

        match self.fallback.lookup(zip).await? {
            Some(result) => {
                info!(provider = %self.fallback.id(), "zip code resolved by fallback provider");
                Ok(Some(result))
            }
            None => {
                warn!(provider = %self.fallback.id(), "fallback provider also reported zip code absent");
                Ok(None)
            }
        }
    }
}
