//! Field parsing utilities for time series and lookup table rows
//!
//! This module provides helper functions for parsing header dates, counts
//! and populations from CSV records with positional error reporting.

use crate::constants::HEADER_DATE_FORMATS;
use crate::{Error, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

/// Position of a field, used for error messages
#[derive(Debug, Clone, Copy)]
pub struct FieldPosition<'a> {
    pub file: &'a str,
    /// 1-based row number
    pub row: usize,
    /// 0-based column index
    pub column: usize,
}

/// Parse a header date in a fixed, locale-independent format
///
/// Month/day/two-digit-year (`1/22/20`) is the published format; a four-digit
/// year and ISO dates are accepted as well.
pub fn parse_header_date(value: &str, position: FieldPosition<'_>) -> Result<NaiveDate> {
    let trimmed = value.trim();

    HEADER_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            Error::format(
                position.file,
                position.row,
                position.column,
                format!(
                    "Invalid header date '{}' (expected M/D/YY, M/D/YYYY or YYYY-MM-DD)",
                    trimmed
                ),
            )
        })
}

/// Parse a cumulative count; a blank field counts as 0
pub fn parse_count(value: &str, position: FieldPosition<'_>) -> Result<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed.parse::<u64>().map_err(|e| {
        Error::format(
            position.file,
            position.row,
            position.column,
            format!("Invalid count '{}': {}", trimmed, e),
        )
    })
}

/// Parse a population value, `None` when blank or not a non-negative integer
pub fn parse_population(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<u64>() {
        Ok(population) => Some(population),
        Err(_) => {
            debug!("Ignoring non-numeric population value '{}'", trimmed);
            None
        }
    }
}

/// Get a trimmed field, empty when the column is absent
pub fn get_field(record: &StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// Get a trimmed field as an owned string
pub fn get_string(record: &StringRecord, index: usize) -> String {
    get_field(record, index).to_string()
}

/// Get a trimmed, non-empty field
pub fn get_optional_field(record: &StringRecord, index: usize) -> Option<String> {
    Some(get_field(record, index))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
