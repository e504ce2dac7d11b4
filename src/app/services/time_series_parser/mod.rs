//! Time series parser for CSSE COVID-19 files
//!
//! Converts a whole delimited file into an ordered list of
//! [`TimeSeriesRecord`](crate::app::models::TimeSeriesRecord)s. Line 1 is the
//! header: its identity columns are parsed as usual and every column from the
//! layout's date column onward holds a date. Data rows hold cumulative counts
//! in those positions and reuse the header's dates positionally.
//!
//! ## Architecture
//!
//! - [`parser`] - File handling and row orchestration
//! - [`layout`] - Where identity, population and date columns live
//! - [`record_parser`] - Header and data row conversion
//! - [`field_parsers`] - Single field conversion (dates, counts, populations)
//! - [`stats`] - Parse statistics and result structures
//!
//! Any structural or format error aborts the whole parse; there is no
//! partial result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use covid19_processor::app::services::time_series_parser::TimeSeriesParser;
//! use covid19_processor::SeriesKind;
//!
//! # fn example() -> covid19_processor::Result<()> {
//! let parser = TimeSeriesParser::for_kind(SeriesKind::ConfirmedGlobal);
//! let result = parser.parse_file(std::path::Path::new("confirmed.csv"))?;
//!
//! println!("Parsed {} locations over {} days",
//!          result.stats.data_records,
//!          result.stats.date_columns);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod layout;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use layout::{IdentityShape, SeriesLayout};
pub use parser::{TimeSeriesParser, parse_time_series};
pub use stats::{ParseResult, ParseStats};
