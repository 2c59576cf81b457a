//! The country record and its display projection.

use crate::presentation::format::format_number;
use serde::Serialize;
use utoipa::ToSchema;

/// One country's happiness/economic data point.
///
/// Records are built once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CountryRecord {
    #[serde(rename = "kraj")]
    pub country: String,
    #[serde(rename = "wynik_szczescia")]
    pub happiness_score: f64,
    /// Thousands of USD.
    #[serde(rename = "pkb_na_osobe")]
    pub gdp_per_capita: f64,
    /// Years.
    #[serde(rename = "zdrowe_zycie")]
    pub healthy_life_expectancy: f64,
}

impl CountryRecord {
    pub fn new(
        country: impl Into<String>,
        happiness_score: f64,
        gdp_per_capita: f64,
        healthy_life_expectancy: f64,
    ) -> Self {
        Self {
            country: country.into(),
            happiness_score,
            gdp_per_capita,
            healthy_life_expectancy,
        }
    }

    /// Case-insensitive exact name match.
    pub fn name_matches(&self, name: &str) -> bool {
        fold_name(&self.country) == fold_name(name)
    }
}

/// Case folding used by every name comparison, in memory and in the postgres table.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// A record as served to clients: raw numbers plus their locale-formatted strings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: CountryRecord,
    pub display: DisplayValues,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DisplayValues {
    pub wynik_szczescia: String,
    pub pkb_na_osobe: String,
    pub zdrowe_zycie: String,
}

impl From<CountryRecord> for RecordView {
    fn from(record: CountryRecord) -> Self {
        let display = DisplayValues {
            wynik_szczescia: format_number(record.happiness_score),
            pkb_na_osobe: format_number(record.gdp_per_capita),
            zdrowe_zycie: format_number(record.healthy_life_expectancy),
        };
        Self { record, display }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_name_match_folds_non_ascii() {
        let record = CountryRecord::new("Österreich", 7.1, 58.0, 71.0);
        assert!(record.name_matches("ÖSTERREICH"));
        assert!(record.name_matches("österreich"));
        assert!(!record.name_matches("Osterreich"));
        assert_eq!(fold_name("ÖSTER"), "öster");
    }
}
