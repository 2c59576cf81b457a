pub mod app;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::RankingService;
pub use domain::{CountryRecord, RankingParams, RecordQuery};
pub use storage::{MemoryStore, PostgresStore, RecordStore};
