//! Tests for combining the rows of one country

use super::*;
use crate::app::services::merge_engine::MergePolicy;
use crate::app::services::merge_engine::aggregation::{aggregate, matches_location, sum_series};

#[test]
fn test_sum_adds_counts_and_deltas_by_position() {
    let alberta = record("Alberta", "Canada", &[0, 0, 2]);
    let bc = record("British Columbia", "Canada", &[3, 5, 6]);

    let summed = sum_series(&[&alberta, &bc]);
    let counts: Vec<u64> = summed.iter().map(|v| v.cumulative_count).collect();
    let deltas: Vec<i64> = summed.iter().map(|v| v.delta_from_prior_day).collect();

    assert_eq!(counts, vec![3, 5, 8]);
    assert_eq!(deltas, vec![3, 2, 3]);
    assert_eq!(summed[2].date, date(3));
}

#[test]
fn test_sum_keeps_delta_invariant() {
    let a = record("A", "X", &[4, 2, 9]);
    let b = record("B", "X", &[1, 1, 0]);

    let summed = sum_series(&[&a, &b]);
    for pair in summed.windows(2) {
        assert_eq!(
            pair[1].delta_from_prior_day,
            pair[1].cumulative_count as i64 - pair[0].cumulative_count as i64
        );
    }
}

#[test]
fn test_last_match_takes_last_row() {
    let alberta = record("Alberta", "Canada", &[0, 0, 2]);
    let bc = record("British Columbia", "Canada", &[3, 5, 6]);

    let values = aggregate(&[&alberta, &bc], MergePolicy::LastMatch);
    assert_eq!(values, bc.date_values().to_vec());
}

#[test]
fn test_no_matches_is_empty() {
    assert!(aggregate(&[], MergePolicy::Sum).is_empty());
    assert!(aggregate(&[], MergePolicy::LastMatch).is_empty());
}

#[test]
fn test_matches_location_rules() {
    let germany = record("", "Germany", &[1]);
    assert!(matches_location(&germany, "Germany", ""));
    assert!(!matches_location(&germany, "germany", ""));

    // Blank country falls back to the province
    let ship = record("Diamond Princess", "", &[1]);
    assert!(matches_location(&ship, "Cruise Ship", "Diamond Princess"));
    assert!(!matches_location(&ship, "Diamond Princess", ""));

    let header = TimeSeriesRecord::header(LocationKey::new("", "Germany"), &[date(1)]);
    assert!(!matches_location(&header, "Germany", ""));
}

#[test]
fn test_policy_parsing() {
    assert_eq!("sum".parse::<MergePolicy>().unwrap(), MergePolicy::Sum);
    assert_eq!("Last-Match".parse::<MergePolicy>().unwrap(), MergePolicy::LastMatch);
    assert!("average".parse::<MergePolicy>().is_err());
    assert_eq!(MergePolicy::default(), MergePolicy::Sum);
    assert_eq!(MergePolicy::LastMatch.to_string(), "last-match");
}
