//! In-memory lookup store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use cep_clima_core::{ZipCode, ZipCodeLookup};

use super::{LookupStore, StoreError};

/// Process-wide in-memory store. Contents are wiped on restart.
#[derive(Debug, Default)]
pub struct MemoryLookupStore {
    records: RwLock<Vec<ZipCodeLookup>>,
}

impl MemoryLookupStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LookupStore for MemoryLookupStore {
    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Option<ZipCodeLookup>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.zip_code == *zip).cloned())
    }

    async fn all(&self) -> Result<Vec<ZipCodeLookup>, StoreError> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn add(&self, lookup: ZipCodeLookup) -> Result<(), StoreError> {
        // The uniqueness check happens under the write lock so a
        // concurrent add of the same zip code cannot also pass it
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.zip_code == lookup.zip_code) {
            return Err(StoreError::Duplicate(lookup.zip_code));
        }
        records.push(lookup);
        Ok(())
    }
}
