//! Ranking query construction.
//!
//! User parameters are normalized into a [`RecordQuery`]: a list of predicates combined
//! with AND, one sort key/direction pair and an optional limit. The query is independent
//! of the store that executes it; [`RecordQuery::apply_to`] runs it over a slice, the
//! postgres store translates it into SQL.

use crate::domain::record::{fold_name, CountryRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub enum SortField {
    #[default]
    #[serde(rename = "wynik_szczescia")]
    HappinessScore,
    #[serde(rename = "pkb_na_osobe")]
    GdpPerCapita,
    #[serde(rename = "zdrowe_zycie")]
    HealthyLifeExpectancy,
}

impl SortField {
    pub const ALL: [SortField; 3] = [
        SortField::HappinessScore,
        SortField::GdpPerCapita,
        SortField::HealthyLifeExpectancy,
    ];

    /// Resolves a raw `sortuj` value. Anything outside the allowed set is the default.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|v| Self::ALL.into_iter().find(|f| f.as_param() == v))
            .unwrap_or_default()
    }

    /// Query-string token; also the column name in the `kraje` table.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::HappinessScore => "wynik_szczescia",
            SortField::GdpPerCapita => "pkb_na_osobe",
            SortField::HealthyLifeExpectancy => "zdrowe_zycie",
        }
    }

    pub fn value_of(&self, record: &CountryRecord) -> f64 {
        match self {
            SortField::HappinessScore => record.happiness_score,
            SortField::GdpPerCapita => record.gdp_per_capita,
            SortField::HealthyLifeExpectancy => record.healthy_life_expectancy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "malejaco")]
    Descending,
    #[serde(rename = "rosnaco")]
    Ascending,
}

impl SortDirection {
    /// Only the literal `rosnaco` means ascending.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("rosnaco") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Descending => "malejaco",
            SortDirection::Ascending => "rosnaco",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Descending => "DESC",
            SortDirection::Ascending => "ASC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Numeric order; `0.0` and `-0.0` compare equal so they stay in source order.
    pub fn compare(&self, a: &CountryRecord, b: &CountryRecord) -> Ordering {
        let ord = sort_key(self.field.value_of(a)).total_cmp(&sort_key(self.field.value_of(b)));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

// Folds -0.0 into 0.0; total_cmp would otherwise order them.
fn sort_key(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Name contains the needle; the needle is already folded with [`fold_name`].
    CountryContains(String),
    MinScore(f64),
}

impl Predicate {
    pub fn matches(&self, record: &CountryRecord) -> bool {
        match self {
            Predicate::CountryContains(needle) => fold_name(&record.country).contains(needle.as_str()),
            Predicate::MinScore(threshold) => record.happiness_score >= *threshold,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    predicates: Vec<Predicate>,
    sort: SortSpec,
    limit: Option<usize>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = SortSpec::new(field, direction);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    pub fn matches(&self, record: &CountryRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Executes the query over an in-memory collection.
    ///
    /// The sort is stable: ties keep their relative order from `records`.
    pub fn apply_to(&self, records: &[CountryRecord]) -> Vec<CountryRecord> {
        let mut out: Vec<CountryRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        let sort = self.sort;
        out.sort_by(|a, b| sort.compare(a, b));
        if let Some(n) = self.limit {
            out.truncate(n);
        }
        out
    }
}

/// Raw ranking/export query string. Every field is free text; nothing here can fail.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingParams {
    /// `wynik_szczescia` | `pkb_na_osobe` | `zdrowe_zycie`
    pub sortuj: Option<String>,
    /// `malejaco` | `rosnaco`
    pub kierunek: Option<String>,
    /// Case-insensitive country name fragment.
    pub kraj: Option<String>,
    /// Minimum happiness score.
    pub min_wynik: Option<String>,
}

/// Parameter values actually applied, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppliedParams {
    pub sortuj: SortField,
    pub kierunek: SortDirection,
    /// Normalized filter (trimmed, lowercased); empty when no filter applies.
    pub kraj: String,
    pub min_wynik: Option<f64>,
}

impl RankingParams {
    /// Builds the parameters from raw query pairs. When a key repeats, its first value
    /// wins; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "sortuj" => &mut params.sortuj,
                "kierunek" => &mut params.kierunek,
                "kraj" => &mut params.kraj,
                "min_wynik" => &mut params.min_wynik,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    pub fn normalize(&self) -> AppliedParams {
        AppliedParams {
            sortuj: SortField::parse_or_default(self.sortuj.as_deref()),
            kierunek: SortDirection::parse_or_default(self.kierunek.as_deref()),
            kraj: normalize_country_filter(self.kraj.as_deref()),
            min_wynik: parse_threshold(self.min_wynik.as_deref()),
        }
    }
}

impl AppliedParams {
    pub fn to_query(&self) -> RecordQuery {
        let mut query = RecordQuery::new().sort_by(self.sortuj, self.kierunek);
        if !self.kraj.is_empty() {
            query = query.filter(Predicate::CountryContains(self.kraj.clone()));
        }
        if let Some(threshold) = self.min_wynik {
            query = query.filter(Predicate::MinScore(threshold));
        }
        query
    }
}

pub fn normalize_country_filter(raw: Option<&str>) -> String {
    raw.map(|v| fold_name(v.trim())).unwrap_or_default()
}

/// `None` for an absent, blank or non-numeric threshold.
pub fn parse_threshold(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub records: Vec<CountryRecord>,
    pub applied: AppliedParams,
}

/// Normalizes `params` and runs the resulting query over `records`.
pub fn apply(records: &[CountryRecord], params: &RankingParams) -> QueryOutcome {
    let applied = params.normalize();
    let records = applied.to_query().apply_to(records);
    QueryOutcome { records, applied }
}
