pub mod query;
pub mod record;

pub use query::{
    apply, AppliedParams, Predicate, QueryOutcome, RankingParams, RecordQuery, SortDirection,
    SortField, SortSpec,
};
pub use record::{fold_name, CountryRecord, DisplayValues, RecordView};
