//! The ranking service.
//!
//! This module sits between the HTTP handlers and the record store. It is responsible for:
//! 1.  Choosing and building the configured store (memory or postgres).
//! 2.  Turning raw ranking parameters into a store query and echoing what was applied.
//! 3.  Producing the CSV export document.

use crate::domain::query::{QueryOutcome, RankingParams, SortField};
use crate::domain::record::CountryRecord;
use crate::infra::config::{self, StoreBackend};
use crate::presentation::export;
use crate::storage::{MemoryStore, PostgresStore, RecordStore, StoreError};
use anyhow::Context;
use std::sync::Arc;
use thiserror::Error;

/// Size of the home page ranking.
pub const TOP_N: usize = 10;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render CSV export: {0}")]
    Export(#[from] csv::Error),
}

pub struct RankingService {
    store: Arc<dyn RecordStore>,
}

impl RankingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Builds the service from environment configuration.
    ///
    /// The memory backend reads the data file here, before any request is served. The
    /// postgres backend only connects; its table is populated on first access.
    pub async fn from_env() -> anyhow::Result<Self> {
        let data_path = config::data_path();
        let store: Arc<dyn RecordStore> = match config::store_backend()? {
            StoreBackend::Memory => Arc::new(
                MemoryStore::load(&data_path)
                    .with_context(|| format!("loading {}", data_path.display()))?,
            ),
            StoreBackend::Postgres => {
                let url = config::database_url()?;
                let mut store =
                    PostgresStore::connect(&url, config::db_max_connections(), data_path).await?;
                if let Some(table) = config::db_table() {
                    store = store
                        .with_table(&table)
                        .with_context(|| format!("DB_TABLE '{}' is not a valid identifier", table))?;
                }
                tracing::info!(table = store.table(), "connected to postgres");
                Arc::new(store)
            }
        };
        Ok(Self::new(store))
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Top ten by happiness score, descending.
    pub async fn top(&self) -> Result<Vec<CountryRecord>, ServiceError> {
        Ok(self.store.top(TOP_N, SortField::HappinessScore).await?)
    }

    pub async fn ranking(&self, params: &RankingParams) -> Result<QueryOutcome, ServiceError> {
        let applied = params.normalize();
        let records = self.store.query(&applied.to_query()).await?;
        tracing::debug!(
            sortuj = applied.sortuj.as_param(),
            kierunek = applied.kierunek.as_param(),
            kraj = %applied.kraj,
            min_wynik = ?applied.min_wynik,
            results = records.len(),
            "ranking query"
        );
        Ok(QueryOutcome { records, applied })
    }

    pub async fn country(&self, name: &str) -> Result<Option<CountryRecord>, ServiceError> {
        Ok(self.store.find_by_name(name).await?)
    }

    /// Same filtering and ordering as [`Self::ranking`], rendered as CSV.
    pub async fn export(&self, params: &RankingParams) -> Result<String, ServiceError> {
        let outcome = self.ranking(params).await?;
        Ok(export::to_csv(&outcome.records)?)
    }

    pub async fn record_count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.count().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::query::SortDirection;

    fn service() -> RankingService {
        let records = (0..15)
            .map(|i| CountryRecord::new(format!("Country {i}"), i as f64 * 0.5, 10.0 + i as f64, 60.0))
            .collect();
        RankingService::new(Arc::new(MemoryStore::new(records)))
    }

    #[tokio::test]
    async fn test_top_returns_ten_best() {
        let top = service().top().await.unwrap();
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].country, "Country 14");
        assert_eq!(top[9].country, "Country 5");
    }

    #[tokio::test]
    async fn test_ranking_echoes_applied_params() {
        let params = RankingParams {
            sortuj: Some("nieznane".into()),
            kierunek: Some("rosnaco".into()),
            kraj: Some(" COUNTRY 1".into()),
            min_wynik: Some("zero".into()),
        };
        let outcome = service().ranking(&params).await.unwrap();

        assert_eq!(outcome.applied.sortuj, SortField::HappinessScore);
        assert_eq!(outcome.applied.kierunek, SortDirection::Ascending);
        assert_eq!(outcome.applied.kraj, "country 1");
        assert_eq!(outcome.applied.min_wynik, None);
        // Country 1, Country 10..=14
        assert_eq!(outcome.records.len(), 6);
        assert_eq!(outcome.records[0].country, "Country 1");
    }

    #[tokio::test]
    async fn test_export_uses_ranking_order() {
        let params = RankingParams {
            min_wynik: Some("6".into()),
            ..Default::default()
        };
        let csv = service().export(&params).await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "kraj,wynik_szczescia,pkb_na_osobe_tys_usd,zdrowe_zycie_lata");
        assert_eq!(lines[1], "Country 14,7.00,24.00,60.00");
        assert_eq!(lines.len(), 1 + 3);
    }
}
