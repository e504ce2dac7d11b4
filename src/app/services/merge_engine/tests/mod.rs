//! Shared test utilities and fixtures for merge engine tests

use crate::app::models::{DateValue, LocationEntry, LocationKey, TimeSeriesRecord};
use crate::app::services::location_directory::LocationDirectory;
use crate::app::services::location_directory::tests::LOOKUP_TABLE;
use crate::app::services::time_series_parser::TimeSeriesParser;
use crate::app::services::time_series_parser::tests::GLOBAL_SERIES;
use chrono::NaiveDate;

pub mod aggregation_tests;

/// Parsed global fixture series: header, Germany, Alberta, British Columbia
pub fn global_series() -> Vec<TimeSeriesRecord> {
    TimeSeriesParser::default()
        .parse_reader(GLOBAL_SERIES.as_bytes(), "time_series_covid19_confirmed_global.csv")
        .unwrap()
        .records
}

/// Fixture lookup entries: Germany, Canada and Antarctica with subdivisions
pub fn lookup_entries() -> Vec<LocationEntry> {
    LocationDirectory::parse_reader(LOOKUP_TABLE.as_bytes(), "lookup.csv")
        .unwrap()
        .0
        .into_entries()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
}

/// Data record over 2021-01-01.. with deltas derived from the counts
pub fn record(province: &str, country: &str, counts: &[u64]) -> TimeSeriesRecord {
    let mut previous = 0u64;
    let values = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let value = DateValue::new(date(i as u32 + 1), count, count as i64 - previous as i64);
            previous = count;
            value
        })
        .collect();
    TimeSeriesRecord::new(LocationKey::new(province, country), values)
}

/// Country-level lookup entry
pub fn country_entry(uid: &str, country: &str, population: Option<u64>) -> LocationEntry {
    LocationEntry {
        uid: uid.to_string(),
        iso2: String::new(),
        iso3: String::new(),
        numeric_code: uid.to_string(),
        fips: String::new(),
        admin2: String::new(),
        location_key: LocationKey::country(country),
        latitude: None,
        longitude: None,
        combined_key: country.to_string(),
        population,
    }
}
