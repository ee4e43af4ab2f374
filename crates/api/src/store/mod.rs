//! Persisted-lookup store boundary.
//!
//! The core workflows only rely on equality lookup by zip code, an
//! all-records read, and a conflict-aware insert. The process keeps
//! lookups in memory only; records do not survive a restart.

mod memory;

pub use memory::MemoryLookupStore;

use async_trait::async_trait;
use thiserror::Error;

use cep_clima_core::{ZipCode, ZipCodeLookup};

/// Errors reported by a lookup store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same zip code already exists. This is the
    /// store-level uniqueness constraint; workflows translate it into
    /// a conflict outcome.
    #[error("a lookup for zip code {0} already exists")]
    Duplicate(ZipCode),

    /// The store could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed persistence for accepted zip code lookups.
///
/// Implementations must guarantee at most one record per zip code:
/// the uniqueness decision belongs inside `add` so that two
/// concurrent inserts of the same new zip code cannot both succeed.
#[async_trait]
pub trait LookupStore: Send + Sync {
    /// Find the record stored for a zip code, if any.
    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Option<ZipCodeLookup>, StoreError>;

    /// Read every stored record, in insertion order.
    async fn all(&self) -> Result<Vec<ZipCodeLookup>, StoreError>;

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::Duplicate`] when a record with the
    /// same zip code is already present.
    async fn add(&self, lookup: ZipCodeLookup) -> Result<(), StoreError>;
}
