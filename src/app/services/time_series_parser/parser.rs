//! Core time series parser implementation
//!
//! This module provides the parser orchestration: opening the file, reading
//! the header row and converting every following row against the header's
//! dates.

use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::layout::SeriesLayout;
use super::record_parser::{parse_data_record, parse_header_record};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{SeriesKind, TimeSeriesRecord};
use crate::{Error, Result};

/// Parse a time series file whose dates begin at `date_column_start`
///
/// Convenience entry point returning only the records (header first).
pub fn parse_time_series(path: &Path, date_column_start: usize) -> Result<Vec<TimeSeriesRecord>> {
    let layout = SeriesLayout::for_date_column_start(date_column_start)?;
    Ok(TimeSeriesParser::new(layout).parse_file(path)?.records)
}

/// Stateless parser for one time series layout
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesParser {
    layout: SeriesLayout,
}

impl TimeSeriesParser {
    /// Create a parser for the given layout
    pub fn new(layout: SeriesLayout) -> Self {
        Self { layout }
    }

    /// Create a parser for a known series file
    pub fn for_kind(kind: SeriesKind) -> Self {
        Self::new(SeriesLayout::for_kind(kind))
    }

    pub fn layout(&self) -> &SeriesLayout {
        &self.layout
    }

    /// Parse a whole file
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing time series file: {}", file_path.display());

        let file = open_input(file_path)?;
        let result = self.parse_reader(file, &file_path.display().to_string())?;

        info!("Parsed {}: {}", file_path.display(), result.stats.summary());
        Ok(result)
    }

    /// Parse from any reader; `source_name` is used in error messages
    pub fn parse_reader<R: Read>(&self, reader: R, source_name: &str) -> Result<ParseResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut stats = ParseStats::new();
        let mut records = Vec::new();
        let mut header_dates = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let row = index + 1;
            let record = result.map_err(|e| {
                Error::csv_parsing(source_name, format!("Failed to read row {}", row), Some(e))
            })?;
            stats.total_rows += 1;

            if row == 1 {
                let (header, dates) = parse_header_record(&record, &self.layout, source_name)?;
                stats.date_columns = dates.len();
                stats.first_date = dates.first().copied();
                stats.last_date = dates.last().copied();
                debug!(
                    "Header of {} announces {} date columns",
                    source_name, stats.date_columns
                );

                header_dates = dates;
                records.push(header);
                continue;
            }

            let parsed = parse_data_record(&record, &self.layout, &header_dates, source_name, row)?;
            records.push(parsed);
            stats.data_records += 1;
        }

        if records.is_empty() {
            warn!("No rows found in {}", source_name);
        }

        Ok(ParseResult { records, stats })
    }
}

/// Open an input file, mapping a missing file to [`Error::FileNotFound`]
pub(crate) fn open_input(file_path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(file_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(file_path.display().to_string())
        } else {
            Error::io(format!("Failed to open {}", file_path.display()), e)
        }
    })
}
