//! Tests for the peak day scan

use super::*;
use crate::app::services::analytics::{PeakDay, PeakMetric, peak_day, peak_delta_day};

#[test]
fn test_peak_delta_day_combines_locations() {
    let confirmed = series(&[("A", &[10, 15, 20]), ("B", &[5, 5, 30])]);

    assert_eq!(peak_delta_day(&confirmed), Some(date(3)));
    assert_eq!(
        peak_day(&confirmed, PeakMetric::Delta),
        Some(PeakDay {
            date: date(3),
            value: 30
        })
    );
}

#[test]
fn test_later_tie_wins() {
    // Combined deltas: 4, 4, 4
    let confirmed = series(&[("A", &[4, 8, 12])]);
    assert_eq!(peak_delta_day(&confirmed), Some(date(3)));

    // Combined deltas: 7, 2, 7, 1
    let confirmed = series(&[("A", &[7, 9, 16, 17])]);
    assert_eq!(peak_delta_day(&confirmed), Some(date(3)));
}

#[test]
fn test_first_date_seeds_the_maximum() {
    let confirmed = series(&[("A", &[0, 0, 0])]);
    assert_eq!(peak_delta_day(&confirmed), Some(date(3)));

    // Downward corrections after day 1
    let confirmed = series(&[("A", &[9, 5, 2])]);
    assert_eq!(
        peak_day(&confirmed, PeakMetric::Delta),
        Some(PeakDay {
            date: date(1),
            value: 9
        })
    );
}

#[test]
fn test_cumulative_metric() {
    let confirmed = series(&[("A", &[10, 15, 14]), ("B", &[5, 5, 5])]);

    assert_eq!(
        peak_day(&confirmed, PeakMetric::Cumulative),
        Some(PeakDay {
            date: date(2),
            value: 20
        })
    );
}

#[test]
fn test_no_data_records() {
    assert_eq!(peak_delta_day(&series(&[])), None);
    assert_eq!(peak_delta_day(&[]), None);
}
