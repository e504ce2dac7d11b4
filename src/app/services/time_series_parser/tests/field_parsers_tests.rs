//! Tests for field parsing utilities

use crate::Error;
use crate::app::services::time_series_parser::field_parsers::*;
use chrono::NaiveDate;
use csv::StringRecord;

fn position() -> FieldPosition<'static> {
    FieldPosition {
        file: "test.csv",
        row: 1,
        column: 4,
    }
}

#[test]
fn test_parse_header_date_two_digit_year() {
    assert_eq!(
        parse_header_date("1/22/20", position()).unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
    );
    assert_eq!(
        parse_header_date("12/31/21", position()).unwrap(),
        NaiveDate::from_ymd_opt(2021, 12, 31).unwrap()
    );
}

#[test]
fn test_parse_header_date_alternative_formats() {
    let expected = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
    assert_eq!(parse_header_date("1/3/2021", position()).unwrap(), expected);
    assert_eq!(parse_header_date("2021-01-03", position()).unwrap(), expected);
    assert_eq!(parse_header_date(" 1/3/21 ", position()).unwrap(), expected);
}

#[test]
fn test_parse_header_date_rejects_day_first() {
    // 22 is not a valid month; the format is never locale dependent
    let result = parse_header_date("22/1/20", position());
    assert!(matches!(result, Err(Error::Format { column: 4, .. })));
}

#[test]
fn test_parse_count() {
    assert_eq!(parse_count("42", position()).unwrap(), 42);
    assert_eq!(parse_count("", position()).unwrap(), 0);
    assert_eq!(parse_count("  ", position()).unwrap(), 0);
    assert!(parse_count("4.5", position()).is_err());
    assert!(parse_count("-3", position()).is_err());
}

#[test]
fn test_parse_population() {
    assert_eq!(parse_population("83149300"), Some(83149300));
    assert_eq!(parse_population(""), None);
    assert_eq!(parse_population("Population"), None);
}

#[test]
fn test_field_access_helpers() {
    let record = StringRecord::from(vec![" Alberta ", "", "53.9"]);

    assert_eq!(get_field(&record, 0), "Alberta");
    assert_eq!(get_field(&record, 9), "");
    assert_eq!(get_string(&record, 2), "53.9");
    assert_eq!(get_optional_field(&record, 1), None);
    assert_eq!(get_optional_field(&record, 2), Some("53.9".to_string()));
}
