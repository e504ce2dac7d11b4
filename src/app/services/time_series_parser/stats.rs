//! Parse statistics and result structures for time series files

use crate::app::models::TimeSeriesRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Header record first, then data records in file order
    pub records: Vec<TimeSeriesRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Data records only (header excluded)
    pub fn data_records(&self) -> impl Iterator<Item = &TimeSeriesRecord> {
        self.records.iter().filter(|record| !record.is_header())
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Rows read including the header
    pub total_rows: usize,

    /// Location rows parsed
    pub data_records: usize,

    /// Date columns announced by the header
    pub date_columns: usize,

    /// First header date
    pub first_date: Option<NaiveDate>,

    /// Last header date
    pub last_date: Option<NaiveDate>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => format!(
                "{} locations x {} days ({} to {})",
                self.data_records, self.date_columns, first, last
            ),
            _ => format!("{} locations, no date columns", self.data_records),
        }
    }
}
