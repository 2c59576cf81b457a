//! CSV export of a ranking result set.
//!
//! Unlike the display format the export is locale-neutral: numbers use a period separator.

use crate::domain::record::CountryRecord;
use csv::{Terminator, WriterBuilder};
use serde::Serialize;

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CONTENT_DISPOSITION: &str = "attachment; filename=ranking.csv";

#[derive(Serialize)]
struct ExportRow<'a> {
    kraj: &'a str,
    wynik_szczescia: String,
    pkb_na_osobe_tys_usd: String,
    zdrowe_zycie_lata: String,
}

impl<'a> From<&'a CountryRecord> for ExportRow<'a> {
    fn from(r: &'a CountryRecord) -> Self {
        Self {
            kraj: &r.country,
            wynik_szczescia: format!("{:.2}", r.happiness_score),
            pkb_na_osobe_tys_usd: format!("{:.2}", r.gdp_per_capita),
            zdrowe_zycie_lata: format!("{:.2}", r.healthy_life_expectancy),
        }
    }
}

/// Renders `records` as a CSV document with a fixed four-column header.
///
/// Rows end with CRLF. The header is written even when `records` is empty.
pub fn to_csv(records: &[CountryRecord]) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(["kraj", "wynik_szczescia", "pkb_na_osobe_tys_usd", "zdrowe_zycie_lata"])?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod test {
    use super::*;
    use csv::ReaderBuilder;

    #[test]
    fn test_header_and_period_separator() {
        let out = to_csv(&[
            CountryRecord::new("Finland", 7.8, 54.3, 72.0),
            CountryRecord::new("Korea, South", 5.951, 34.0, 73.6),
        ])
        .unwrap();

        let expected = indoc::indoc! {"
            kraj,wynik_szczescia,pkb_na_osobe_tys_usd,zdrowe_zycie_lata
            Finland,7.80,54.30,72.00
            \"Korea, South\",5.95,34.00,73.60
        "}
        .replace('\n', "\r\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let out = to_csv(&[]).unwrap();
        assert_eq!(out, "kraj,wynik_szczescia,pkb_na_osobe_tys_usd,zdrowe_zycie_lata\r\n");
    }

    #[test]
    fn test_every_row_ends_with_crlf() {
        let out = to_csv(&[
            CountryRecord::new("Finland", 7.8, 54.3, 72.0),
            CountryRecord::new("Poland", 6.26, 18.7, 69.0),
        ])
        .unwrap();

        assert!(out.ends_with("\r\n"));
        assert_eq!(out.matches("\r\n").count(), 3);
        assert_eq!(out.matches('\n').count(), 3);
    }

    #[test]
    fn test_round_trip_to_two_decimals() {
        let records = vec![
            CountryRecord::new("Finland", 7.8041, 54.3, 72.0),
            CountryRecord::new("Poland", 6.2601, 37.456, 69.31),
            CountryRecord::new("Chad", 4.397, 1.6, 53.01),
        ];
        let out = to_csv(&records).unwrap();

        let mut reader = ReaderBuilder::new().from_reader(out.as_bytes());
        let parsed: Vec<(String, f64, f64, f64)> =
            reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(parsed.len(), records.len());
        for (row, expected) in parsed.iter().zip(&records) {
            assert_eq!(row.0, expected.country);
            assert!((row.1 - expected.happiness_score).abs() <= 0.005 + 1e-9);
            assert!((row.2 - expected.gdp_per_capita).abs() <= 0.005 + 1e-9);
            assert!((row.3 - expected.healthy_life_expectancy).abs() <= 0.005 + 1e-9);
        }
    }
}
