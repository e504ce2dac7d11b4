//! Lookup table row parsing
//!
//! Converts one row of `UID_ISO_FIPS_LookUp_Table.csv` into a
//! [`LocationEntry`]. The population column is parsed eagerly; blank or
//! non-numeric values become `None` instead of failing the load.

use crate::app::models::{LocationEntry, LocationKey};
use crate::app::services::time_series_parser::field_parsers::{
    get_field, get_optional_field, get_string, parse_population,
};
use crate::constants::{LOOKUP_TABLE_COLUMNS, us_columns};
use crate::{Error, Result};
use csv::StringRecord;

/// Parse a lookup table row
///
/// # Errors
/// * Returns `Error::MalformedInput` when the row has fewer than 12 columns
pub fn parse_location_entry(record: &StringRecord, file: &str, row: usize) -> Result<LocationEntry> {
    if record.len() < LOOKUP_TABLE_COLUMNS {
        return Err(Error::malformed_input(
            file,
            row,
            LOOKUP_TABLE_COLUMNS,
            record.len(),
        ));
    }

    Ok(LocationEntry {
        uid: get_string(record, us_columns::UID),
        iso2: get_string(record, us_columns::ISO2),
        iso3: get_string(record, us_columns::ISO3),
        numeric_code: get_string(record, us_columns::CODE3),
        fips: get_string(record, us_columns::FIPS),
        admin2: get_string(record, us_columns::ADMIN2),
        location_key: LocationKey::new(
            get_string(record, us_columns::PROVINCE_OR_STATE),
            get_string(record, us_columns::COUNTRY_OR_REGION),
        ),
        latitude: get_optional_field(record, us_columns::LATITUDE),
        longitude: get_optional_field(record, us_columns::LONGITUDE),
        combined_key: get_string(record, us_columns::COMBINED_KEY),
        population: parse_population(get_field(record, us_columns::POPULATION)),
    })
}
