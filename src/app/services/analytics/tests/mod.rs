//! Shared test utilities and fixtures for analytics tests

use crate::app::models::{DateValue, LocationKey, MergedRecord, TimeSeriesRecord, UsIdentity};
use chrono::NaiveDate;

pub mod peak_tests;
pub mod summary_tests;

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
}

/// Data record over consecutive days from 2021-01-01
pub fn record(country: &str, counts: &[u64]) -> TimeSeriesRecord {
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
    TimeSeriesRecord::new(LocationKey::country(country), values)
}

/// Header followed by one record per `(country, counts)`
pub fn series(rows: &[(&str, &[u64])]) -> Vec<TimeSeriesRecord> {
    let days = rows.first().map_or(0, |(_, counts)| counts.len());
    let dates: Vec<NaiveDate> = (1..=days as u32).map(date).collect();

    let mut records = vec![TimeSeriesRecord::header(
        LocationKey::new("Province/State", "Country/Region"),
        &dates,
    )];
    records.extend(rows.iter().map(|(country, counts)| record(country, counts)));
    records
}

/// US county record carrying a UID
pub fn us_record(uid: &str, combined_key: &str, counts: &[u64]) -> TimeSeriesRecord {
    record("US", counts).with_us_identity(UsIdentity {
        uid: uid.to_string(),
        combined_key: combined_key.to_string(),
        ..UsIdentity::default()
    })
}

pub fn merged(country: &str, counts: &[u64], population: u64) -> MergedRecord {
    MergedRecord::new(record(country, counts), population)
}
