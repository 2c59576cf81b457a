//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "dane/dane_szczescie.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "memory" | "pamiec" => Some(StoreBackend::Memory),
            "postgres" | "postgresql" => Some(StoreBackend::Postgres),
            _ => None,
        }
    }
}

/// Path of the CSV data file.
pub fn data_path() -> PathBuf {
    std::env::var("DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}

/// `memory` (default) or `postgres`.
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match std::env::var("STORE_BACKEND") {
        Ok(v) => StoreBackend::parse(&v)
            .with_context(|| format!("STORE_BACKEND must be 'memory' or 'postgres', got '{}'", v)),
        Err(_) => Ok(StoreBackend::Memory),
    }
}

/// Database URL must be provided (no default) when the postgres backend is selected.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set for the postgres backend")
}

/// Optional table override for the postgres backend.
pub fn db_table() -> Option<String> {
    std::env::var("DB_TABLE").ok().filter(|v| !v.trim().is_empty())
}

pub fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
        .max(1)
}

pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(StoreBackend::parse("memory"), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse(" Postgres "), Some(StoreBackend::Postgres));
        assert_eq!(StoreBackend::parse("sqlite"), None);
    }
}
