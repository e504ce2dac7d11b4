//! Application constants for the COVID-19 processor
//!
//! This module contains file names, column positions and default values
//! used throughout the processor.

// =============================================================================
// Input Files
// =============================================================================

/// Default root of the CSSE data checkout
pub const DEFAULT_BASE_PATH: &str = "COVID-19/csse_covid_19_data";

/// Sub-directory holding the time series files
pub const DEFAULT_TIME_SERIES_DIR: &str = "csse_covid_19_time_series";

/// Location/population lookup table file name (lives directly in the base path)
pub const DEFAULT_LOOKUP_TABLE_FILE: &str = "UID_ISO_FIPS_LookUp_Table.csv";

/// Time series file names, matched case-insensitively on disk
pub mod file_names {
    pub const CONFIRMED_GLOBAL: &str = "time_series_covid19_confirmed_global.csv";
    pub const DEATHS_GLOBAL: &str = "time_series_covid19_deaths_global.csv";
    pub const RECOVERED_GLOBAL: &str = "time_series_covid19_recovered_global.csv";
    pub const CONFIRMED_US: &str = "time_series_covid19_confirmed_US.csv";
    pub const DEATHS_US: &str = "time_series_covid19_deaths_US.csv";
}

// =============================================================================
// Column Layouts
// =============================================================================

/// Global series: `Province/State, Country/Region, Lat, Long, <dates...>`
pub mod global_columns {
    pub const PROVINCE_OR_STATE: usize = 0;
    pub const COUNTRY_OR_REGION: usize = 1;
    pub const LATITUDE: usize = 2;
    pub const LONGITUDE: usize = 3;
    pub const DATE_COLUMN_START: usize = 4;
}

/// US series and lookup table share the same leading identity columns
pub mod us_columns {
    pub const UID: usize = 0;
    pub const ISO2: usize = 1;
    pub const ISO3: usize = 2;
    pub const CODE3: usize = 3;
    pub const FIPS: usize = 4;
    pub const ADMIN2: usize = 5;
    pub const PROVINCE_OR_STATE: usize = 6;
    pub const COUNTRY_OR_REGION: usize = 7;
    pub const LATITUDE: usize = 8;
    pub const LONGITUDE: usize = 9;
    pub const COMBINED_KEY: usize = 10;
    /// Only present in the deaths series and the lookup table
    pub const POPULATION: usize = 11;
    pub const CONFIRMED_DATE_COLUMN_START: usize = 11;
    pub const DEATHS_DATE_COLUMN_START: usize = 12;
}

/// Number of columns in the lookup table
pub const LOOKUP_TABLE_COLUMNS: usize = 12;

// =============================================================================
// Date Handling
// =============================================================================

/// Header date formats, tried in order (month/day/two-digit year first)
pub const HEADER_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

// =============================================================================
// Analysis Defaults
// =============================================================================

/// Number of rows in ranked tables
pub const DEFAULT_TOP_N: usize = 20;

/// Window used for "confirmed N days ago" comparisons
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

/// Country reported alongside the percentage ranking
pub const DEFAULT_FOCUS_COUNTRY: &str = "Germany";

/// US rankings keep only UIDs strictly below this value (states and counties)
pub const DEFAULT_US_UID_CEILING: u64 = 84_060_000;

// =============================================================================
// Environment Variables
// =============================================================================

pub mod env_vars {
    pub const DATA_PATH: &str = "COVID19_DATA_PATH";
    pub const TOP_N: &str = "COVID19_TOP_N";
    pub const MERGE_POLICY: &str = "COVID19_MERGE_POLICY";
}

/// Directory name used below the platform config directory
pub const CONFIG_DIR_NAME: &str = "covid19-processor";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
