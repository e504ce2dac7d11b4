//! Merge statistics and result structures

use crate::app::models::MergedRecord;

/// Statistics for one merge run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeStats {
    /// Series rows given to the merge (header included)
    pub series_records: usize,

    /// Country-level lookup entries considered
    pub country_entries: usize,

    /// Countries with at least one matching series row
    pub matched_countries: usize,

    /// Countries without any matching series row
    pub unmatched_countries: usize,

    /// Countries built from more than one series row
    pub multi_row_countries: usize,

    /// Countries whose population is blank or zero
    pub missing_populations: usize,
}

impl MergeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of countries that found a series, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.country_entries == 0 {
            0.0
        } else {
            (self.matched_countries as f64 / self.country_entries as f64) * 100.0
        }
    }

    /// Get a summary string of the merge
    pub fn summary(&self) -> String {
        format!(
            "Merged {} series rows into {} countries ({:.1}% matched, {} multi-row, {} without population)",
            self.series_records,
            self.country_entries,
            self.match_rate(),
            self.multi_row_countries,
            self.missing_populations
        )
    }
}

/// Merged records together with the statistics of the run
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub records: Vec<MergedRecord>,
    pub stats: MergeStats,
}

impl MergeResult {
    /// Merged records excluding the header
    pub fn countries(&self) -> impl Iterator<Item = &MergedRecord> {
        self.records.iter().filter(|record| !record.is_header())
    }
}
