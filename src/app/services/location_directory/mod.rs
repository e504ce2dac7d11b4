//! Location directory service for location and population lookups
//!
//! This module loads the UID/ISO/FIPS lookup table into memory and indexes it
//! by country and by UID. Rows whose numeric country code equals their UID
//! describe a whole country; every other row is a subdivision of that country.

use crate::app::models::LocationEntry;
use std::collections::HashMap;
use std::path::PathBuf;

pub mod loader;
pub mod metadata;
pub mod parser;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use loader::parse_location_directory;
pub use metadata::LoadStats;

/// In-memory lookup table with country and UID indexes
#[derive(Debug, Clone, Default)]
pub struct LocationDirectory {
    /// Entries in file order
    pub(crate) entries: Vec<LocationEntry>,

    /// Entry positions by country/region (case-sensitive)
    pub(crate) by_country: HashMap<String, Vec<usize>>,

    /// Entry position by UID
    pub(crate) by_uid: HashMap<String, usize>,

    /// File the entries were read from, if any
    pub(crate) source_path: Option<PathBuf>,
}

impl LocationDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from already parsed entries
    pub fn from_entries(entries: Vec<LocationEntry>) -> Self {
        let mut by_country: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_uid = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            by_country
                .entry(entry.country_or_region().to_string())
                .or_default()
                .push(index);
            // First occurrence wins for duplicated UIDs
            by_uid.entry(entry.uid.clone()).or_insert(index);
        }

        Self {
            entries,
            by_country,
            by_uid,
            source_path: None,
        }
    }

    /// All entries in file order
    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    /// Consume the directory, returning its entries
    pub fn into_entries(self) -> Vec<LocationEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the directory was loaded from
    pub fn source_path(&self) -> Option<&std::path::Path> {
        self.source_path.as_deref()
    }
}
