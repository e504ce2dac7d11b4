//! Individual row parsing for time series files
//!
//! This module turns one tokenized row into a [`TimeSeriesRecord`]. The header
//! row yields the column dates; data rows yield counts and per-day deltas
//! aligned with those dates.

use csv::StringRecord;

use super::field_parsers::{
    FieldPosition, get_field, get_optional_field, get_string, parse_count, parse_header_date,
    parse_population,
};
use super::layout::{IdentityShape, SeriesLayout};
use crate::app::models::{DateValue, LocationKey, TimeSeriesRecord, UsIdentity};
use crate::constants::{global_columns, us_columns};
use crate::{Error, Result};
use chrono::NaiveDate;

/// Parse the identity columns shared by header and data rows
pub fn parse_identity(record: &StringRecord, layout: &SeriesLayout) -> TimeSeriesRecord {
    match layout.shape {
        IdentityShape::Global => TimeSeriesRecord::new(
            LocationKey::new(
                get_string(record, global_columns::PROVINCE_OR_STATE),
                get_string(record, global_columns::COUNTRY_OR_REGION),
            ),
            Vec::new(),
        )
        .with_coordinates(
            get_optional_field(record, global_columns::LATITUDE),
            get_optional_field(record, global_columns::LONGITUDE),
        ),
        IdentityShape::Us => {
            let identity = UsIdentity {
                uid: get_string(record, us_columns::UID),
                iso2: get_string(record, us_columns::ISO2),
                iso3: get_string(record, us_columns::ISO3),
                code3: get_string(record, us_columns::CODE3),
                fips: get_string(record, us_columns::FIPS),
                admin2: get_string(record, us_columns::ADMIN2),
                combined_key: get_string(record, us_columns::COMBINED_KEY),
                population: layout
                    .population_column
                    .and_then(|index| parse_population(get_field(record, index))),
            };

            TimeSeriesRecord::new(
                LocationKey::new(
                    get_string(record, us_columns::PROVINCE_OR_STATE),
                    get_string(record, us_columns::COUNTRY_OR_REGION),
                ),
                Vec::new(),
            )
            .with_coordinates(
                get_optional_field(record, us_columns::LATITUDE),
                get_optional_field(record, us_columns::LONGITUDE),
            )
            .with_us_identity(identity)
        }
    }
}

/// Parse the header row: identity columns plus one date per date column
///
/// Returns the header record and the parsed dates for positional reuse.
pub fn parse_header_record(
    record: &StringRecord,
    layout: &SeriesLayout,
    file: &str,
) -> Result<(TimeSeriesRecord, Vec<NaiveDate>)> {
    if record.len() < layout.date_column_start {
        return Err(Error::malformed_input(
            file,
            1,
            layout.date_column_start,
            record.len(),
        ));
    }

    let dates = record
        .iter()
        .enumerate()
        .skip(layout.date_column_start)
        .map(|(column, value)| {
            parse_header_date(
                value,
                FieldPosition {
                    file,
                    row: 1,
                    column,
                },
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let header = parse_identity(record, layout).into_header(&dates);
    Ok((header, dates))
}

/// Parse a data row against the header's dates
///
/// The i-th count is paired with the header's i-th date; counts are never
/// read as dates. The running previous count starts at 0, so the first delta
/// equals the first count.
pub fn parse_data_record(
    record: &StringRecord,
    layout: &SeriesLayout,
    header_dates: &[NaiveDate],
    file: &str,
    row: usize,
) -> Result<TimeSeriesRecord> {
    let expected = layout.date_column_start + header_dates.len();
    if record.len() != expected {
        return Err(Error::malformed_input(file, row, expected, record.len()));
    }

    let mut previous_count: u64 = 0;
    let mut date_values = Vec::with_capacity(header_dates.len());

    for (offset, &date) in header_dates.iter().enumerate() {
        let column = layout.date_column_start + offset;
        let cumulative_count = parse_count(
            get_field(record, column),
            FieldPosition { file, row, column },
        )?;

        date_values.push(DateValue::new(
            date,
            cumulative_count,
            cumulative_count as i64 - previous_count as i64,
        ));
        previous_count = cumulative_count;
    }

    Ok(parse_identity(record, layout).with_date_values(date_values))
}
