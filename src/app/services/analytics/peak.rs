//! Day with the most activity across all locations

use crate::app::models::TimeSeriesRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::summary::{reference_axis, value_at};

/// Field a peak day is ranked by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PeakMetric {
    /// New cases on the day (sum of daily deltas)
    #[default]
    Delta,
    /// Cumulative cases up to the day
    Cumulative,
}

/// A date together with the combined value that made it the peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub value: i64,
}

/// Date with the highest combined daily delta
pub fn peak_delta_day(series: &[TimeSeriesRecord]) -> Option<NaiveDate> {
    peak_day(series, PeakMetric::Delta).map(|peak| peak.date)
}

/// Scan the reference axis for the date with the highest combined value
///
/// The first date sets the initial maximum; afterwards any date whose sum is
/// greater than or equal to the current maximum replaces it, so the latest of
/// several tied dates wins. Records missing a date contribute 0 to it.
pub fn peak_day(series: &[TimeSeriesRecord], metric: PeakMetric) -> Option<PeakDay> {
    let axis = reference_axis(series)?;

    let mut peak: Option<PeakDay> = None;
    for (position, date) in axis.dates().enumerate() {
        let value = combined_value(series, position, date, metric);
        match peak {
            Some(current) if value < current.value => {}
            _ => peak = Some(PeakDay { date, value }),
        }
    }
    peak
}

fn combined_value(
    series: &[TimeSeriesRecord],
    position: usize,
    date: NaiveDate,
    metric: PeakMetric,
) -> i64 {
    series
        .iter()
        .filter(|record| !record.is_header())
        .filter_map(|record| value_at(record, position, date))
        .map(|value| match metric {
            PeakMetric::Delta => value.delta_from_prior_day,
            PeakMetric::Cumulative => value.cumulative_count as i64,
        })
        .sum()
}
