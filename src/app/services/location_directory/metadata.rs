//! Location directory loading statistics

/// Statistics about loading the lookup table
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Data rows read (header excluded)
    pub rows_read: usize,

    /// Entries loaded
    pub entries_loaded: usize,

    /// Entries describing a whole country
    pub country_level_entries: usize,

    /// Entries whose population column was blank or not numeric
    pub missing_populations: usize,

    /// Time taken to load the table
    pub load_duration: std::time::Duration,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of entries without a usable population, as a percentage
    pub fn missing_population_rate(&self) -> f64 {
        if self.entries_loaded == 0 {
            0.0
        } else {
            (self.missing_populations as f64 / self.entries_loaded as f64) * 100.0
        }
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} locations ({} country-level, {:.1}% without population) in {:.2}s",
            self.entries_loaded,
            self.country_level_entries,
            self.missing_population_rate(),
            self.load_duration.as_secs_f64()
        )
    }
}
