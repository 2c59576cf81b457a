//! Record stores.
//!
//! Two backends implement [`RecordStore`]: [`MemoryStore`] keeps the whole dataset in an
//! immutable shared slice, [`PostgresStore`] keeps it in a single table that is populated
//! from the data file on first access.

pub mod memory;
pub mod postgres;
pub mod source;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use source::{load_from_path, LoadReport, RejectedRow, SourceError};

use crate::domain::query::{RecordQuery, SortDirection, SortField};
use crate::domain::record::CountryRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Source(#[from] SourceError),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Full collection in source order.
    async fn all(&self) -> Result<Vec<CountryRecord>, StoreError>;

    /// Records matching every predicate of `query`, in the query's order.
    async fn query(&self, query: &RecordQuery) -> Result<Vec<CountryRecord>, StoreError>;

    /// First record (in source order) whose name equals `name` case-insensitively.
    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// The `n` highest records by `field`.
    async fn top(&self, n: usize, field: SortField) -> Result<Vec<CountryRecord>, StoreError> {
        let query = RecordQuery::new()
            .sort_by(field, SortDirection::Descending)
            .limit(n);
        self.query(&query).await
    }
}
