//! Collapsing the series rows of one country into a single series

use super::policy::MergePolicy;
use crate::app::models::{DateValue, TimeSeriesRecord};

/// Combine the matching rows of one country according to `policy`
///
/// No matching rows gives an empty series.
pub fn aggregate(matches: &[&TimeSeriesRecord], policy: MergePolicy) -> Vec<DateValue> {
    match policy {
        MergePolicy::LastMatch => matches
            .last()
            .map(|record| record.date_values().to_vec())
            .unwrap_or_default(),
        MergePolicy::Sum => sum_series(matches),
    }
}

/// Element-wise sum of cumulative counts and deltas
///
/// Positions follow the first row; rows of one parsed file always share the
/// header's date axis, so a shorter row only contributes to the positions it has.
pub fn sum_series(matches: &[&TimeSeriesRecord]) -> Vec<DateValue> {
    let Some((first, rest)) = matches.split_first() else {
        return Vec::new();
    };

    let mut totals = first.date_values().to_vec();
    for record in rest {
        for (total, value) in totals.iter_mut().zip(record.date_values()) {
            total.cumulative_count += value.cumulative_count;
            total.delta_from_prior_day += value.delta_from_prior_day;
        }
    }
    totals
}

/// Whether a series row belongs to the country of a lookup entry
///
/// Rows with a blank country are matched on province instead. Comparison is
/// case-sensitive and header rows never match.
pub fn matches_location(record: &TimeSeriesRecord, country: &str, province: &str) -> bool {
    if record.is_header() {
        return false;
    }
    if record.country_or_region().is_empty() {
        record.province_or_state() == province
    } else {
        record.country_or_region() == country
    }
}
