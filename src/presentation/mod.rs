//! Display formatting and the CSV export adapter.

pub mod export;
pub mod format;

pub use export::to_csv;
pub use format::{format_display, format_number};
