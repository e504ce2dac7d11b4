//! Tests for totals, window deltas and the outbreak summary

use super::*;
use crate::app::services::analytics::{
    OutbreakSummary, delta_over_window, reference_axis, total_at_latest_date, total_on,
    total_recent_delta,
};

#[test]
fn test_total_at_latest_date_skips_header() {
    let confirmed = series(&[("A", &[1, 2, 3]), ("B", &[10, 20, 30])]);

    assert_eq!(total_at_latest_date(&confirmed), 33);
    assert_eq!(total_on(&confirmed, date(2)), 22);
    assert_eq!(total_on(&confirmed, date(9)), 0);
}

#[test]
fn test_reference_axis_is_first_data_record() {
    let confirmed = series(&[("A", &[1, 2]), ("B", &[3, 4])]);
    assert_eq!(reference_axis(&confirmed).unwrap().country_or_region(), "A");

    let header_only = series(&[]);
    assert!(reference_axis(&header_only).is_none());
}

#[test]
fn test_delta_over_window() {
    let confirmed = series(&[("A", &[1, 2, 5]), ("B", &[10, 20, 30])]);

    assert_eq!(delta_over_window(&confirmed, 2), Some(24));
    assert_eq!(delta_over_window(&confirmed, 0), Some(0));
}

#[test]
fn test_delta_over_window_without_exact_date() {
    let confirmed = series(&[("A", &[1, 2, 5])]);

    assert_eq!(delta_over_window(&confirmed, 14), None);
    assert_eq!(delta_over_window(&series(&[]), 1), None);
}

#[test]
fn test_total_recent_delta() {
    let confirmed = series(&[("A", &[1, 2, 5]), ("B", &[10, 20, 18])]);
    assert_eq!(total_recent_delta(&confirmed), 3 - 2);
}

#[test]
fn test_outbreak_summary() {
    let confirmed = series(&[("A", &[100, 150, 200]), ("B", &[50, 50, 100])]);
    let deaths = series(&[("A", &[1, 2, 3]), ("B", &[0, 1, 3])]);
    let recovered = series(&[("A", &[10, 20, 40]), ("B", &[0, 0, 4])]);

    let summary = OutbreakSummary::compute(&confirmed, &deaths, Some(&recovered), 2);

    assert_eq!(summary.latest_date, Some(date(3)));
    assert_eq!(summary.confirmed, 300);
    assert_eq!(summary.deaths, 6);
    assert_eq!(summary.recovered, Some(44));
    assert_eq!(summary.active, 250);
    assert_eq!(summary.recent_delta, 100);
    assert!((summary.death_ratio.unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(summary.confirmed_window_ago, Some(150));
    assert!((summary.lagged_death_ratio().unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_outbreak_summary_without_cases() {
    let confirmed = series(&[("A", &[0, 0])]);
    let deaths = series(&[("A", &[0, 0])]);

    let summary = OutbreakSummary::compute(&confirmed, &deaths, None, 14);

    assert_eq!(summary.recovered, None);
    assert_eq!(summary.death_ratio, None);
    assert_eq!(summary.confirmed_window_ago, None);
    assert_eq!(summary.lagged_death_ratio(), None);
}
