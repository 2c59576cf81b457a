//! Single-table PostgreSQL record store.
//!
//! The table mirrors the data file's four columns plus a `BIGSERIAL` id that preserves
//! file order and `kraj_lower`, the name folded by [`fold_name`] at insert time. Name
//! matching runs against that column, so it does not depend on the database collation.
//! The table is created and filled from the data file the first time any read needs it;
//! once it holds rows it is never written again.

use crate::domain::query::{Predicate, RecordQuery};
use crate::domain::record::{fold_name, CountryRecord};
use crate::storage::source;
use crate::storage::{RecordStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::path::PathBuf;
use tokio::sync::OnceCell;

pub const DEFAULT_TABLE: &str = "kraje";

/// Advisory lock held by the populating transaction (must be stable across instances).
const POPULATE_LOCK_ID: i64 = 4_240_017;

/// Rows per INSERT statement; keeps bind parameters well below the protocol limit.
const INSERT_CHUNK: usize = 500;

const SELECT_COLUMNS: &str = "kraj, wynik_szczescia, pkb_na_osobe, zdrowe_zycie";

pub struct PostgresStore {
    pool: PgPool,
    table: String,
    source: PathBuf,
    /// Rows inserted by this process; set once population has been checked.
    populated: OnceCell<u64>,
}

impl PostgresStore {
    pub fn new(pool: PgPool, source: PathBuf) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
            source,
            populated: OnceCell::new(),
        }
    }

    /// Connects a pool; no table is touched until the first read.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        source: PathBuf,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool, source))
    }

    /// Uses `table` instead of [`DEFAULT_TABLE`]. Returns `None` for a name that is not a
    /// plain SQL identifier.
    pub fn with_table(mut self, table: &str) -> Option<Self> {
        if !validate_ident(table) {
            return None;
        }
        self.table = table.to_string();
        Some(self)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether this process has already checked (and if needed filled) the table.
    pub fn is_populated(&self) -> bool {
        self.populated.initialized()
    }

    /// Populates the table on the first call in this process; later calls return at once.
    pub async fn ensure_populated(&self) -> Result<(), StoreError> {
        self.populated
            .get_or_try_init(|| self.populate_if_empty())
            .await?;
        Ok(())
    }

    /// Creates the table if needed and fills it from the data file if it is empty.
    ///
    /// Runs in one transaction under an advisory lock, so concurrent first requests (or
    /// several service instances) cannot both insert. Returns the number of rows inserted,
    /// `0` when the table already held data.
    pub async fn populate_if_empty(&self) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(POPULATE_LOCK_ID)
            .execute(&mut *tx)
            .await?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                kraj TEXT NOT NULL,
                kraj_lower TEXT NOT NULL,
                wynik_szczescia DOUBLE PRECISION NOT NULL,
                pkb_na_osobe DOUBLE PRECISION NOT NULL,
                zdrowe_zycie DOUBLE PRECISION NOT NULL
            )",
            self.table
        ))
        .execute(&mut *tx)
        .await?;

        let existing: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.commit().await?;
            tracing::debug!(table = %self.table, existing, "table already populated");
            return Ok(0);
        }

        let report = source::load_from_path(&self.source)?;
        for chunk in report.records.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO ");
            qb.push(&self.table)
                .push(" (")
                .push(SELECT_COLUMNS)
                .push(", kraj_lower) ");
            qb.push_values(chunk, |mut b, r| {
                b.push_bind(r.country.clone())
                    .push_bind(r.happiness_score)
                    .push_bind(r.gdp_per_capita)
                    .push_bind(r.healthy_life_expectancy)
                    .push_bind(fold_name(&r.country));
            });
            qb.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        let inserted = report.records.len() as u64;
        tracing::info!(
            table = %self.table,
            inserted,
            skipped = report.skipped(),
            "populated table from data file"
        );
        Ok(inserted)
    }

    fn select(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(SELECT_COLUMNS).push(" FROM ").push(&self.table);
        qb
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, StoreError> {
        self.ensure_populated().await?;
        let mut qb = self.select();
        qb.push(" ORDER BY id");
        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(record_from_row).collect::<Result<_, _>>()?)
    }

    async fn query(&self, query: &RecordQuery) -> Result<Vec<CountryRecord>, StoreError> {
        self.ensure_populated().await?;

        let mut qb = self.select();
        push_predicates(&mut qb, query.predicates());

        // id breaks ties so equal keys keep file order, as the in-memory sort does.
        let sort = query.sort();
        qb.push(" ORDER BY ")
            .push(sort.field.as_param())
            .push(" ")
            .push(sort.direction.as_sql())
            .push(", id ASC");
        if let Some(n) = query.max_results() {
            qb.push(" LIMIT ").push_bind(n as i64);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(record_from_row).collect::<Result<_, _>>()?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>, StoreError> {
        self.ensure_populated().await?;
        let mut qb = self.select();
        qb.push(" WHERE kraj_lower = ")
            .push_bind(fold_name(name))
            .push(" ORDER BY id LIMIT 1");
        let row = qb.build().fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.ensure_populated().await?;
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as u64)
    }
}

fn push_predicates(qb: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            // strpos, not LIKE: the needle is plain text, `%` and `_` match literally
            Predicate::CountryContains(needle) => {
                qb.push("strpos(kraj_lower, ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            Predicate::MinScore(threshold) => {
                qb.push("wynik_szczescia >= ").push_bind(*threshold);
            }
        }
    }
}

fn record_from_row(row: &PgRow) -> Result<CountryRecord, sqlx::Error> {
    Ok(CountryRecord {
        country: row.try_get("kraj")?,
        happiness_score: row.try_get("wynik_szczescia")?,
        gdp_per_capita: row.try_get("pkb_na_osobe")?,
        healthy_life_expectancy: row.try_get("zdrowe_zycie")?,
    })
}

pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::query::{SortDirection, SortField};

    #[test]
    fn test_validate_ident() {
        assert!(validate_ident("kraje"));
        assert!(validate_ident("_kraje_2024"));
        assert!(!validate_ident("2kraje"));
        assert!(!validate_ident("kraje; DROP TABLE kraje"));
        assert!(!validate_ident(""));
    }

    #[test]
    fn test_query_sql_shape() {
        let query = RecordQuery::new()
            .filter(Predicate::CountryContains("land".to_string()))
            .filter(Predicate::MinScore(7.0))
            .sort_by(SortField::GdpPerCapita, SortDirection::Ascending)
            .limit(10);

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        qb.push(SELECT_COLUMNS).push(" FROM kraje");
        push_predicates(&mut qb, query.predicates());

        assert_eq!(
            qb.sql(),
            "SELECT kraj, wynik_szczescia, pkb_na_osobe, zdrowe_zycie FROM kraje \
             WHERE strpos(kraj_lower, $1) > 0 AND wynik_szczescia >= $2"
        );
    }
}
