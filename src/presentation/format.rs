//! Locale-style number rendering for display.

/// Two fractional digits, comma as the decimal separator: `7.8` -> `"7,80"`.
pub fn format_number(v: f64) -> String {
    format!("{:.2}", v).replace('.', ",")
}

/// Formats `raw` if it parses as a number, otherwise returns it unchanged.
pub fn format_display(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) => format_number(v),
        Err(_) => raw.to_string(),
    }
}
