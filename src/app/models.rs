//! Data models for COVID-19 time series processing
//!
//! This module contains the core data structures for representing parsed time
//! series rows, location metadata from the UID/ISO/FIPS lookup table and the
//! population-annotated records produced by the merge engine.

use crate::constants::{file_names, global_columns, us_columns};
use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// =============================================================================
// Observations
// =============================================================================

/// One observation of a location on a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// Calendar day of the observation
    pub date: NaiveDate,

    /// Total cases recorded up to and including `date`
    pub cumulative_count: u64,

    /// Change against the previous entry of the same series (first entry: the count itself)
    pub delta_from_prior_day: i64,
}

impl DateValue {
    /// Create a new observation
    pub fn new(date: NaiveDate, cumulative_count: u64, delta_from_prior_day: i64) -> Self {
        Self {
            date,
            cumulative_count,
            delta_from_prior_day,
        }
    }

    /// Header placeholder: a date with no counts
    pub fn header(date: NaiveDate) -> Self {
        Self::new(date, 0, 0)
    }
}

// =============================================================================
// Location Identity
// =============================================================================

/// Composite identity of a reporting unit: (province/state, country/region)
///
/// Equality and hashing are ordinal (case-sensitive). Ordering through
/// [`LocationKey::cmp_ignore_case`] is case-insensitive, so two keys that differ
/// only in case compare as `Equal` while still being distinct values. This
/// asymmetry is why the type deliberately does not implement `Ord`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub province_or_state: String,
    pub country_or_region: String,
}

impl LocationKey {
    pub fn new(province_or_state: impl Into<String>, country_or_region: impl Into<String>) -> Self {
        Self {
            province_or_state: province_or_state.into(),
            country_or_region: country_or_region.into(),
        }
    }

    /// Country-wide key with an empty province
    pub fn country(country_or_region: impl Into<String>) -> Self {
        Self::new(String::new(), country_or_region)
    }

    /// Case-insensitive ordering
    ///
    /// Provinces decide the order unless they are equal (ignoring case) while
    /// the countries differ, in which case the countries decide.
    pub fn cmp_ignore_case(&self, other: &Self) -> Ordering {
        let province = cmp_case_insensitive(&self.province_or_state, &other.province_or_state);
        let country = cmp_case_insensitive(&self.country_or_region, &other.country_or_region);

        if province == Ordering::Equal && country != Ordering::Equal {
            country
        } else {
            province
        }
    }

    /// Display name: "Province, Country" or just "Country"
    pub fn display_name(&self) -> String {
        if self.province_or_state.is_empty() {
            self.country_or_region.clone()
        } else if self.country_or_region.is_empty() {
            self.province_or_state.clone()
        } else {
            format!("{}, {}", self.province_or_state, self.country_or_region)
        }
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Identity columns only present in the US series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsIdentity {
    pub uid: String,
    pub iso2: String,
    pub iso3: String,
    pub code3: String,
    pub fips: String,
    pub admin2: String,
    pub combined_key: String,
    /// Only populated by the deaths series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl UsIdentity {
    /// Numeric UID, if the column holds a number
    pub fn uid_number(&self) -> Option<u64> {
        self.uid.trim().parse().ok()
    }
}

// =============================================================================
// Time Series Record
// =============================================================================

/// One parsed row of a time series file: a location and its full history
///
/// Identity for equality and hashing is `(is_header, location_key)`; the
/// coordinates and the date values are not part of it.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesRecord {
    is_header: bool,
    location_key: LocationKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    us_identity: Option<UsIdentity>,
    date_values: Vec<DateValue>,
}

impl TimeSeriesRecord {
    /// Create a data record
    pub fn new(location_key: LocationKey, date_values: Vec<DateValue>) -> Self {
        Self {
            is_header: false,
            location_key,
            latitude: None,
            longitude: None,
            us_identity: None,
            date_values,
        }
    }

    /// Create the synthetic header record holding the column dates
    pub fn header(location_key: LocationKey, dates: &[NaiveDate]) -> Self {
        Self::new(location_key, Vec::new()).into_header(dates)
    }

    /// Attach display coordinates (blank strings become `None`)
    pub fn with_coordinates(mut self, latitude: Option<String>, longitude: Option<String>) -> Self {
        self.latitude = latitude.filter(|s| !s.trim().is_empty());
        self.longitude = longitude.filter(|s| !s.trim().is_empty());
        self
    }

    /// Replace the series
    pub fn with_date_values(mut self, date_values: Vec<DateValue>) -> Self {
        self.date_values = date_values;
        self
    }

    /// Turn a parsed identity into the header record for the given dates
    pub fn into_header(mut self, dates: &[NaiveDate]) -> Self {
        self.is_header = true;
        self.date_values = dates.iter().copied().map(DateValue::header).collect();
        self
    }

    /// Attach US identity columns
    pub fn with_us_identity(mut self, identity: UsIdentity) -> Self {
        self.us_identity = Some(identity);
        self
    }

    pub fn is_header(&self) -> bool {
        self.is_header
    }

    pub fn location_key(&self) -> &LocationKey {
        &self.location_key
    }

    pub fn province_or_state(&self) -> &str {
        &self.location_key.province_or_state
    }

    pub fn country_or_region(&self) -> &str {
        &self.location_key.country_or_region
    }

    pub fn latitude(&self) -> Option<&str> {
        self.latitude.as_deref()
    }

    pub fn longitude(&self) -> Option<&str> {
        self.longitude.as_deref()
    }

    pub fn us_identity(&self) -> Option<&UsIdentity> {
        self.us_identity.as_ref()
    }

    /// Ordered observations, ascending by date
    pub fn date_values(&self) -> &[DateValue] {
        &self.date_values
    }

    /// Dates of this record in column order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.date_values.iter().map(|value| value.date)
    }

    /// Most recent observation
    pub fn latest(&self) -> Option<&DateValue> {
        self.date_values.last()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.latest().map(|value| value.date)
    }

    /// Cumulative count on the latest date, 0 for an empty series
    pub fn latest_cumulative(&self) -> u64 {
        self.latest().map_or(0, |value| value.cumulative_count)
    }

    /// Observation on an exact date
    pub fn value_on(&self, date: NaiveDate) -> Option<&DateValue> {
        self.date_values.iter().find(|value| value.date == date)
    }

    /// Latest cumulative count minus the cumulative count on the calendar day before
    ///
    /// A missing previous day counts as 0; an empty series yields 0.
    pub fn recent_delta(&self) -> i64 {
        let Some(latest) = self.latest() else {
            return 0;
        };
        let day_before = latest
            .date
            .checked_sub_signed(Duration::days(1))
            .and_then(|date| self.value_on(date))
            .map_or(0, |value| value.cumulative_count);

        latest.cumulative_count as i64 - day_before as i64
    }

    /// Case-insensitive ordering on the location key
    pub fn cmp_ignore_case(&self, other: &Self) -> Ordering {
        self.location_key.cmp_ignore_case(&other.location_key)
    }
}

impl PartialEq for TimeSeriesRecord {
    fn eq(&self, other: &Self) -> bool {
        self.is_header == other.is_header && self.location_key == other.location_key
    }
}

impl Eq for TimeSeriesRecord {}

impl Hash for TimeSeriesRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_header.hash(state);
        self.location_key.hash(state);
    }
}

// =============================================================================
// Location Directory Entry
// =============================================================================

/// One row of the UID/ISO/FIPS lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Unique identifier for the row
    pub uid: String,
    pub iso2: String,
    pub iso3: String,
    /// Numeric country code (`Code3`); equals `uid` for country-level rows
    pub numeric_code: String,
    pub fips: String,
    /// County name (US only), may be empty
    pub admin2: String,
    pub location_key: LocationKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    /// Human-readable summary, e.g. "Bavaria, Germany"
    pub combined_key: String,
    /// `None` when the column is blank or not a number
    pub population: Option<u64>,
}

impl LocationEntry {
    /// A row describing a whole country rather than a subdivision
    pub fn is_country_level(&self) -> bool {
        self.numeric_code == self.uid
    }

    /// Population with blank/invalid values treated as 0
    pub fn population(&self) -> u64 {
        self.population.unwrap_or(0)
    }

    pub fn country_or_region(&self) -> &str {
        &self.location_key.country_or_region
    }

    pub fn province_or_state(&self) -> &str {
        &self.location_key.province_or_state
    }

    /// Numeric UID, if the column holds a number
    pub fn uid_number(&self) -> Option<u64> {
        self.uid.trim().parse().ok()
    }
}

impl std::fmt::Display for LocationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location_key.country_or_region)
    }
}

// =============================================================================
// Merged Record
// =============================================================================

/// A time series record annotated with the population of its location
///
/// Only the merge engine constructs these; they are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    record: TimeSeriesRecord,
    population: u64,
}

impl MergedRecord {
    pub(crate) fn new(record: TimeSeriesRecord, population: u64) -> Self {
        Self { record, population }
    }

    pub fn record(&self) -> &TimeSeriesRecord {
        &self.record
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn is_header(&self) -> bool {
        self.record.is_header()
    }

    pub fn country_or_region(&self) -> &str {
        self.record.country_or_region()
    }

    pub fn date_values(&self) -> &[DateValue] {
        self.record.date_values()
    }

    pub fn latest_cumulative(&self) -> u64 {
        self.record.latest_cumulative()
    }

    /// Latest cumulative count as a percentage of the population
    ///
    /// Returns 0 for an empty series and for a zero population, so the
    /// value is always finite.
    pub fn percentage_of_population(&self) -> f64 {
        if self.record.date_values().is_empty() || self.population == 0 {
            return 0.0;
        }
        self.record.latest_cumulative() as f64 * 100.0 / self.population as f64
    }
}

// =============================================================================
// Series Kinds
// =============================================================================

/// The time series files published by CSSE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    ConfirmedGlobal,
    DeathsGlobal,
    RecoveredGlobal,
    ConfirmedUs,
    DeathsUs,
}

impl SeriesKind {
    /// All known series
    pub const ALL: [SeriesKind; 5] = [
        SeriesKind::ConfirmedGlobal,
        SeriesKind::DeathsGlobal,
        SeriesKind::RecoveredGlobal,
        SeriesKind::ConfirmedUs,
        SeriesKind::DeathsUs,
    ];

    /// Canonical file name
    pub fn file_name(&self) -> &'static str {
        match self {
            SeriesKind::ConfirmedGlobal => file_names::CONFIRMED_GLOBAL,
            SeriesKind::DeathsGlobal => file_names::DEATHS_GLOBAL,
            SeriesKind::RecoveredGlobal => file_names::RECOVERED_GLOBAL,
            SeriesKind::ConfirmedUs => file_names::CONFIRMED_US,
            SeriesKind::DeathsUs => file_names::DEATHS_US,
        }
    }

    /// First column holding a date (header) or a count (data rows)
    pub fn date_column_start(&self) -> usize {
        match self {
            SeriesKind::ConfirmedGlobal | SeriesKind::DeathsGlobal | SeriesKind::RecoveredGlobal => {
                global_columns::DATE_COLUMN_START
            }
            SeriesKind::ConfirmedUs => us_columns::CONFIRMED_DATE_COLUMN_START,
            SeriesKind::DeathsUs => us_columns::DEATHS_DATE_COLUMN_START,
        }
    }

    pub fn is_us(&self) -> bool {
        matches!(self, SeriesKind::ConfirmedUs | SeriesKind::DeathsUs)
    }

    /// Match a file name case-insensitively
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_name().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::ConfirmedGlobal => "confirmed-global",
            SeriesKind::DeathsGlobal => "deaths-global",
            SeriesKind::RecoveredGlobal => "recovered-global",
            SeriesKind::ConfirmedUs => "confirmed-us",
            SeriesKind::DeathsUs => "deaths-us",
        }
    }
}

impl FromStr for SeriesKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_argument(
                    "series",
                    format!(
                        "Unknown series '{}': expected one of confirmed-global, deaths-global, \
                         recovered-global, confirmed-us, deaths-us",
                        s
                    ),
                )
            })
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_with_counts(key: LocationKey, start: NaiveDate, counts: &[u64]) -> TimeSeriesRecord {
        let mut previous = 0u64;
        let values = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let value = DateValue::new(
                    start + Duration::days(i as i64),
                    count,
                    count as i64 - previous as i64,
                );
                previous = count;
                value
            })
            .collect();
        TimeSeriesRecord::new(key, values)
    }

    #[test]
    fn test_location_key_equality_is_case_sensitive() {
        let a = LocationKey::new("Bavaria", "Germany");
        let b = LocationKey::new("bavaria", "germany");

        assert_ne!(a, b);
        assert_eq!(a.cmp_ignore_case(&b), Ordering::Equal);
    }

    #[test]
    fn test_location_key_ordering_uses_country_when_provinces_match() {
        let a = LocationKey::country("austria");
        let b = LocationKey::country("Belgium");

        assert_eq!(a.cmp_ignore_case(&b), Ordering::Less);
        assert_eq!(b.cmp_ignore_case(&a), Ordering::Greater);
    }

    #[test]
    fn test_location_key_ordering_uses_province_first() {
        let a = LocationKey::new("Alberta", "Canada");
        let b = LocationKey::new("Bavaria", "Austria");

        assert_eq!(a.cmp_ignore_case(&b), Ordering::Less);
    }

    #[test]
    fn test_location_key_display_name() {
        assert_eq!(LocationKey::country("Germany").display_name(), "Germany");
        assert_eq!(
            LocationKey::new("Hubei", "China").display_name(),
            "Hubei, China"
        );
    }

    #[test]
    fn test_record_identity_ignores_series() {
        let key = LocationKey::country("Germany");
        let a = record_with_counts(key.clone(), date(2021, 1, 1), &[1, 2, 3]);
        let b = record_with_counts(key.clone(), date(2021, 1, 1), &[7]);
        let header = TimeSeriesRecord::header(key, &[date(2021, 1, 1)]);

        assert_eq!(a, b);
        assert_ne!(a, header);

        let set: HashSet<_> = [a, b, header].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_header_record_has_zero_counts() {
        let header = TimeSeriesRecord::header(
            LocationKey::new("Province/State", "Country/Region"),
            &[date(2020, 1, 22), date(2020, 1, 23)],
        );

        assert!(header.is_header());
        assert_eq!(header.date_values().len(), 2);
        assert!(header.date_values().iter().all(|v| v.cumulative_count == 0));
    }

    #[test]
    fn test_recent_delta_uses_previous_calendar_day() {
        let record = record_with_counts(LocationKey::country("Italy"), date(2021, 3, 1), &[10, 25, 40]);
        assert_eq!(record.recent_delta(), 15);
    }

    #[test]
    fn test_recent_delta_missing_previous_day_counts_as_zero() {
        let values = vec![
            DateValue::new(date(2021, 3, 1), 10, 10),
            DateValue::new(date(2021, 3, 5), 30, 20),
        ];
        let record = TimeSeriesRecord::new(LocationKey::country("Italy"), values);
        assert_eq!(record.recent_delta(), 30);
    }

    #[test]
    fn test_recent_delta_empty_series() {
        let record = TimeSeriesRecord::new(LocationKey::country("Italy"), Vec::new());
        assert_eq!(record.recent_delta(), 0);
        assert_eq!(record.latest_cumulative(), 0);
        assert_eq!(record.latest_date(), None);
    }

    #[test]
    fn test_with_coordinates_drops_blank_values() {
        let record = TimeSeriesRecord::new(LocationKey::country("Canada"), Vec::new())
            .with_coordinates(Some(" ".to_string()), Some("-106.3".to_string()));

        assert_eq!(record.latitude(), None);
        assert_eq!(record.longitude(), Some("-106.3"));
    }

    #[test]
    fn test_location_entry_country_level() {
        let mut entry = LocationEntry {
            uid: "276".to_string(),
            iso2: "DE".to_string(),
            iso3: "DEU".to_string(),
            numeric_code: "276".to_string(),
            fips: String::new(),
            admin2: String::new(),
            location_key: LocationKey::country("Germany"),
            latitude: None,
            longitude: None,
            combined_key: "Germany".to_string(),
            population: None,
        };

        assert!(entry.is_country_level());
        assert_eq!(entry.population(), 0);

        entry.uid = "27601".to_string();
        assert!(!entry.is_country_level());
        assert_eq!(entry.uid_number(), Some(27601));
    }

    #[test]
    fn test_merged_record_percentage_guards() {
        let record = record_with_counts(LocationKey::country("Iceland"), date(2021, 1, 1), &[50]);

        let merged = MergedRecord::new(record.clone(), 1000);
        assert!((merged.percentage_of_population() - 5.0).abs() < f64::EPSILON);

        let zero_population = MergedRecord::new(record, 0);
        assert_eq!(zero_population.percentage_of_population(), 0.0);

        let empty = MergedRecord::new(
            TimeSeriesRecord::new(LocationKey::country("Iceland"), Vec::new()),
            1000,
        );
        assert_eq!(empty.percentage_of_population(), 0.0);
    }

    #[test]
    fn test_series_kind_file_names() {
        assert_eq!(SeriesKind::ConfirmedGlobal.date_column_start(), 4);
        assert_eq!(SeriesKind::ConfirmedUs.date_column_start(), 11);
        assert_eq!(SeriesKind::DeathsUs.date_column_start(), 12);

        assert_eq!(
            SeriesKind::from_file_name("time_series_covid19_confirmed_us.csv"),
            Some(SeriesKind::ConfirmedUs)
        );
        assert_eq!(SeriesKind::from_file_name("readme.md"), None);
    }

    #[test]
    fn test_series_kind_from_str() {
        assert_eq!(
            "deaths-global".parse::<SeriesKind>().unwrap(),
            SeriesKind::DeathsGlobal
        );
        assert!("hospitalised".parse::<SeriesKind>().is_err());
    }
}
