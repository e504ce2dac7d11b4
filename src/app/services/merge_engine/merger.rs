//! Joining time series rows with country-level lookup entries

use super::aggregation::{aggregate, matches_location};
use super::policy::MergePolicy;
use super::stats::{MergeResult, MergeStats};
use crate::app::models::{LocationEntry, LocationKey, MergedRecord, TimeSeriesRecord};
use crate::{Error, Result};
use tracing::{debug, info};

/// Merge with the default policy
///
/// Shorthand for `MergeEngine::default().merge_by_country(Some(records), Some(entries))`.
pub fn merge(records: &[TimeSeriesRecord], entries: &[LocationEntry]) -> Result<Vec<MergedRecord>> {
    MergeEngine::default().merge_by_country(Some(records), Some(entries))
}

/// Joins a parsed series against the location directory
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine {
    policy: MergePolicy,
}

impl MergeEngine {
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Produce one population-annotated record per country-level entry
    ///
    /// The series header, if present, comes first with population 0 and an
    /// empty series. Countries follow ordered by name (case-insensitive,
    /// stable for duplicates). A country without matching rows gets an empty
    /// series; a blank population becomes 0.
    ///
    /// # Errors
    /// * Returns `Error::InvalidArgument` if either input is `None`
    pub fn merge_by_country(
        &self,
        series: Option<&[TimeSeriesRecord]>,
        directory: Option<&[LocationEntry]>,
    ) -> Result<Vec<MergedRecord>> {
        Ok(self.merge_with_stats(series, directory)?.records)
    }

    /// Same as [`merge_by_country`](Self::merge_by_country), also returning statistics
    pub fn merge_with_stats(
        &self,
        series: Option<&[TimeSeriesRecord]>,
        directory: Option<&[LocationEntry]>,
    ) -> Result<MergeResult> {
        let series =
            series.ok_or_else(|| Error::invalid_argument("series", "time series must be provided"))?;
        let directory = directory
            .ok_or_else(|| Error::invalid_argument("directory", "location entries must be provided"))?;

        let mut stats = MergeStats::new();
        stats.series_records = series.len();

        let mut country_entries: Vec<&LocationEntry> = directory
            .iter()
            .filter(|entry| entry.is_country_level())
            .collect();
        country_entries.sort_by(|a, b| {
            a.country_or_region()
                .to_lowercase()
                .cmp(&b.country_or_region().to_lowercase())
        });
        stats.country_entries = country_entries.len();

        let mut records = Vec::with_capacity(country_entries.len() + 1);
        if let Some(header) = series.iter().find(|record| record.is_header()) {
            records.push(MergedRecord::new(header.clone().with_date_values(Vec::new()), 0));
        }

        for entry in country_entries {
            let matches: Vec<&TimeSeriesRecord> = series
                .iter()
                .filter(|record| {
                    matches_location(record, entry.country_or_region(), entry.province_or_state())
                })
                .collect();

            match matches.len() {
                0 => {
                    stats.unmatched_countries += 1;
                    debug!("No series rows for country '{}'", entry.country_or_region());
                }
                1 => stats.matched_countries += 1,
                n => {
                    stats.matched_countries += 1;
                    stats.multi_row_countries += 1;
                    debug!(
                        "Country '{}' reported as {} rows, combining with {}",
                        entry.country_or_region(),
                        n,
                        self.policy
                    );
                }
            }

            let population = entry.population();
            if population == 0 {
                stats.missing_populations += 1;
            }

            let record = TimeSeriesRecord::new(
                LocationKey::new(entry.province_or_state(), entry.country_or_region()),
                aggregate(&matches, self.policy),
            )
            .with_coordinates(entry.latitude.clone(), entry.longitude.clone());

            records.push(MergedRecord::new(record, population));
        }

        info!("{}", stats.summary());
        Ok(MergeResult { records, stats })
    }
}
