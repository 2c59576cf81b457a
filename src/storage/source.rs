//! Loader for the static country data file.
//!
//! The file is CSV with the header `kraj,wynik_szczescia,pkb_na_osobe,zdrowe_zycie`.
//! Rows whose numeric fields do not parse are skipped; only file-level problems
//! (unreadable file, unreadable header, missing column) fail the load.

use crate::domain::record::CountryRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COL_COUNTRY: &str = "kraj";
pub const COL_SCORE: &str = "wynik_szczescia";
pub const COL_GDP: &str = "pkb_na_osobe";
pub const COL_HEALTHY_LIFE: &str = "zdrowe_zycie";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open data file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read data file header: {0}")]
    Header(#[from] csv::Error),
    #[error("data file is missing required column '{0}'")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("row has no '{0}' field")]
    MissingField(&'static str),
    #[error("empty country name")]
    EmptyName,
    #[error("'{column}' is not a number: {value:?}")]
    NotANumber { column: &'static str, value: String },
}

/// A dropped data row: its line number, raw fields and why it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub line: usize,
    pub fields: Vec<String>,
    pub reason: String,
}

/// Valid records in file order plus the rows that were dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<CountryRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    country: usize,
    score: usize,
    gdp: usize,
    healthy_life: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, SourceError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(SourceError::MissingColumn(name))
        };
        Ok(Self {
            country: find(COL_COUNTRY)?,
            score: find(COL_SCORE)?,
            gdp: find(COL_GDP)?,
            healthy_life: find(COL_HEALTHY_LIFE)?,
        })
    }
}

pub fn load_from_path(path: &Path) -> Result<LoadReport, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_from_reader(file)?;
    tracing::debug!(
        path = %path.display(),
        loaded = report.records.len(),
        skipped = report.skipped(),
        "data file loaded"
    );
    Ok(report)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<LoadReport, SourceError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::locate(reader.headers()?)?;

    let mut report = LoadReport::default();
    for (idx, row) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = idx + 2;
        let (fields, parsed) = match row {
            Ok(r) => (
                r.iter().map(String::from).collect(),
                parse_row(&r, columns).map_err(|e| e.to_string()),
            ),
            Err(e) => (Vec::new(), Err(e.to_string())),
        };
        match parsed {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::debug!(line, %reason, "skipping data row");
                report.rejected.push(RejectedRow { line, fields, reason });
            }
        }
    }
    Ok(report)
}

fn parse_row(row: &StringRecord, columns: Columns) -> Result<CountryRecord, RowError> {
    let country = row.get(columns.country).ok_or(RowError::MissingField(COL_COUNTRY))?;
    if country.trim().is_empty() {
        return Err(RowError::EmptyName);
    }
    Ok(CountryRecord {
        country: country.to_string(),
        happiness_score: parse_number(row, columns.score, COL_SCORE)?,
        gdp_per_capita: parse_number(row, columns.gdp, COL_GDP)?,
        healthy_life_expectancy: parse_number(row, columns.healthy_life, COL_HEALTHY_LIFE)?,
    })
}

fn parse_number(row: &StringRecord, idx: usize, column: &'static str) -> Result<f64, RowError> {
    let raw = row.get(idx).ok_or(RowError::MissingField(column))?;
    raw.trim().parse::<f64>().map_err(|_| RowError::NotANumber {
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::{assert, let_assert};

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = indoc::indoc! {"
            kraj,wynik_szczescia,pkb_na_osobe,zdrowe_zycie
            Finland,7.80,54.3,72.0
            Denmark,n/a,68.0,71.9
            Poland,6.26,37.0
            ,6.0,10.0,60.0
            Iceland, 7.53 ,69.0,72.8
            Chad,4.40,1.6,x
        "};

        let report = load_from_reader(csv.as_bytes()).unwrap();

        let names: Vec<&str> = report.records.iter().map(|r| r.country.as_str()).collect();
        assert!(names == ["Finland", "Iceland"]);
        assert!(report.skipped() == 4);
        assert!(report.records[1].happiness_score == 7.53);

        let lines: Vec<usize> = report.rejected.iter().map(|r| r.line).collect();
        assert!(lines == [3, 4, 5, 7]);
        assert!(report.rejected[0].fields == ["Denmark", "n/a", "68.0", "71.9"]);
        assert!(report.rejected[0].reason.contains("wynik_szczescia"));
    }

    #[test]
    fn test_column_order_follows_header() {
        let csv = indoc::indoc! {"
            zdrowe_zycie,kraj,pkb_na_osobe,wynik_szczescia,region
            72.0,Finland,54.3,7.80,Europe
        "};

        let report = load_from_reader(csv.as_bytes()).unwrap();
        assert!(report.records == [CountryRecord::new("Finland", 7.80, 54.3, 72.0)]);
    }

    #[test]
    fn test_missing_column_fails_the_load() {
        let csv = "kraj,wynik_szczescia,pkb_na_osobe\nFinland,7.8,54.3\n";

        let_assert!(Err(SourceError::MissingColumn(col)) = load_from_reader(csv.as_bytes()));
        assert!(col == "zdrowe_zycie");
    }

    #[test]
    fn test_parse_row_reports_reason() {
        let columns = Columns { country: 0, score: 1, gdp: 2, healthy_life: 3 };
        let row = StringRecord::from(vec!["Finland", "7.8", "abc", "72"]);

        assert!(
            parse_row(&row, columns)
                == Err(RowError::NotANumber { column: COL_GDP, value: "abc".to_string() })
        );
    }

    #[test]
    fn test_missing_file() {
        let_assert!(Err(SourceError::Open { .. }) = load_from_path(Path::new("no/such/file.csv")));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("dane/dane_szczescie.csv");
        let report = load_from_path(&path).unwrap();

        assert!(report.records.len() >= 10);
        assert!(report.records.iter().any(|r| r.country == "Finland"));
    }
}
