//! Location lookup functionality
//!
//! Country names are matched exactly (case-sensitive), the same way the time
//! series and the lookup table spell them.

use super::LocationDirectory;
use crate::app::models::LocationEntry;
use std::collections::BTreeMap;
use tracing::warn;

impl LocationDirectory {
    /// All entries (country-level and subdivisions) for a country
    pub fn find_by_country(&self, country: &str) -> Vec<&LocationEntry> {
        self.by_country
            .get(country)
            .map(|indexes| indexes.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// The entry describing the whole country, if any
    ///
    /// A well-formed table has exactly one such row per country; if several
    /// exist the first one in file order is returned.
    pub fn find_country_level(&self, country: &str) -> Option<&LocationEntry> {
        let mut candidates = self
            .find_by_country(country)
            .into_iter()
            .filter(|entry| entry.is_country_level());

        let first = candidates.next();
        if first.is_some() && candidates.next().is_some() {
            warn!(
                "Multiple country-level entries for '{}', using the first",
                country
            );
        }
        first
    }

    /// Entry by UID
    pub fn find_by_uid(&self, uid: &str) -> Option<&LocationEntry> {
        self.by_uid.get(uid).map(|&i| &self.entries[i])
    }

    /// Population of a country, summed over its country-level entries
    ///
    /// Subdivisions are excluded to avoid double counting; blank populations
    /// count as 0 and an unknown country yields 0.
    pub fn country_population(&self, country: &str) -> u64 {
        self.find_by_country(country)
            .into_iter()
            .filter(|entry| entry.is_country_level())
            .map(LocationEntry::population)
            .sum()
    }

    /// Country-level entries in file order
    pub fn country_level_entries(&self) -> impl Iterator<Item = &LocationEntry> {
        self.entries.iter().filter(|entry| entry.is_country_level())
    }

    /// Subdivisions of a country (entries whose numeric code differs from their UID)
    pub fn subdivisions(&self, country: &str) -> Vec<&LocationEntry> {
        self.find_by_country(country)
            .into_iter()
            .filter(|entry| !entry.is_country_level())
            .collect()
    }

    /// Subdivisions of a country grouped by numeric country code
    pub fn subdivisions_by_numeric_code(
        &self,
        country: &str,
    ) -> BTreeMap<String, Vec<&LocationEntry>> {
        let mut groups: BTreeMap<String, Vec<&LocationEntry>> = BTreeMap::new();
        for entry in self.subdivisions(country) {
            groups
                .entry(entry.numeric_code.clone())
                .or_default()
                .push(entry);
        }
        groups
    }

    /// Distinct country names in file order
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(LocationEntry::country_or_region)
            .filter(|country| seen.insert(*country))
            .collect()
    }
}
