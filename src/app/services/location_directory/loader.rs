//! Location directory loading
//!
//! Reads the lookup table in one pass. The first line is the column header
//! and is not turned into an entry.

use super::LocationDirectory;
use super::metadata::LoadStats;
use super::parser::parse_location_entry;
use crate::app::models::LocationEntry;
use crate::app::services::time_series_parser::parser::open_input;
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Parse the lookup table into its entries
pub fn parse_location_directory(path: &Path) -> Result<Vec<LocationEntry>> {
    Ok(LocationDirectory::parse(path)?.into_entries())
}

impl LocationDirectory {
    /// Load and index the lookup table
    ///
    /// # Errors
    /// * Returns `Error::FileNotFound` if the file does not exist
    /// * Returns `Error::MalformedInput` for rows with fewer than 12 columns
    /// * Returns `Error::CsvParsing` if the tokenizer fails
    pub fn parse(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.0)
    }

    /// Load the lookup table and report loading statistics
    pub fn load(path: &Path) -> Result<(Self, LoadStats)> {
        info!("Loading location directory: {}", path.display());

        let file = open_input(path)?;
        let (mut directory, stats) = Self::parse_reader(file, &path.display().to_string())?;
        directory.source_path = Some(path.to_path_buf());

        info!("{}", stats.summary());
        Ok((directory, stats))
    }

    /// Load from any reader; `source_name` is used in error messages
    pub fn parse_reader<R: Read>(reader: R, source_name: &str) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let mut stats = LoadStats::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            // Row 1 is the column header
            let row = index + 2;
            let record = result.map_err(|e| {
                Error::csv_parsing(source_name, format!("Failed to read row {}", row), Some(e))
            })?;
            stats.rows_read += 1;

            let entry = parse_location_entry(&record, source_name, row)?;
            if entry.population.is_none() {
                stats.missing_populations += 1;
            }
            if entry.is_country_level() {
                stats.country_level_entries += 1;
            }
            entries.push(entry);
        }

        stats.entries_loaded = entries.len();
        stats.load_duration = start_time.elapsed();
        debug!(
            "Read {} lookup rows from {}, {} without population",
            stats.rows_read, source_name, stats.missing_populations
        );

        Ok((Self::from_entries(entries), stats))
    }
}
