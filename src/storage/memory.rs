use crate::domain::query::RecordQuery;
use crate::domain::record::CountryRecord;
use crate::storage::source::{self, SourceError};
use crate::storage::{RecordStore, StoreError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Dataset materialized once and shared read-only by every request.
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<[CountryRecord]>,
}

impl MemoryStore {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Loads the data file; malformed rows are dropped, file-level errors are returned.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let report = source::load_from_path(path)?;
        tracing::info!(
            path = %path.display(),
            records = report.records.len(),
            skipped = report.skipped(),
            "in-memory dataset ready"
        );
        Ok(Self::new(report.records))
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, StoreError> {
        Ok(self.records.to_vec())
    }

    async fn query(&self, query: &RecordQuery) -> Result<Vec<CountryRecord>, StoreError> {
        Ok(query.apply_to(&self.records))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>, StoreError> {
        Ok(self.records.iter().find(|r| r.name_matches(name)).cloned())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::query::SortField;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            CountryRecord::new("Poland", 6.26, 37.0, 69.3),
            CountryRecord::new("Finland", 7.80, 54.3, 72.0),
            CountryRecord::new("Luxembourg", 7.12, 118.0, 72.6),
        ])
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive_exact() {
        let store = store();

        let found = store.find_by_name("FINLAND").await.unwrap();
        assert_eq!(found.map(|r| r.country), Some("Finland".to_string()));
        assert!(store.find_by_name("Findland").await.unwrap().is_none());
        assert!(store.find_by_name("Fin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_top_by_field() {
        let store = store();

        let top = store.top(2, SortField::GdpPerCapita).await.unwrap();
        let names: Vec<_> = top.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, ["Luxembourg", "Finland"]);

        let all = store.top(10, SortField::HappinessScore).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_all_keeps_source_order() {
        let store = store();
        let names: Vec<_> = store.all().await.unwrap().into_iter().map(|r| r.country).collect();
        assert_eq!(names, ["Poland", "Finland", "Luxembourg"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }
}
