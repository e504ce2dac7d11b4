//! Totals and window deltas

use crate::app::models::{DateValue, TimeSeriesRecord};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// First data record, whose dates serve as the axis of the whole series
pub fn reference_axis(series: &[TimeSeriesRecord]) -> Option<&TimeSeriesRecord> {
    series.iter().find(|record| !record.is_header())
}

/// Sum of every data record's latest cumulative count
pub fn total_at_latest_date(series: &[TimeSeriesRecord]) -> u64 {
    series
        .iter()
        .filter(|record| !record.is_header())
        .map(TimeSeriesRecord::latest_cumulative)
        .sum()
}

/// Sum of cumulative counts on an exact date; records without that date add 0
pub fn total_on(series: &[TimeSeriesRecord], date: NaiveDate) -> u64 {
    series
        .iter()
        .filter(|record| !record.is_header())
        .filter_map(|record| record.value_on(date))
        .map(|value| value.cumulative_count)
        .sum()
}

/// Observation on `date`, looked up at `position` first
///
/// Records of one file share the axis, so the positional hit is the common case.
pub(crate) fn value_at(record: &TimeSeriesRecord, position: usize, date: NaiveDate) -> Option<&DateValue> {
    record
        .date_values()
        .get(position)
        .filter(|value| value.date == date)
        .or_else(|| record.value_on(date))
}

/// Sum of every data record's recent delta
pub fn total_recent_delta(series: &[TimeSeriesRecord]) -> i64 {
    series
        .iter()
        .filter(|record| !record.is_header())
        .map(TimeSeriesRecord::recent_delta)
        .sum()
}

/// Growth of the total over the last `days` days
///
/// Returns `None` when the series has no data record or the axis lacks the
/// exact date `days` before its latest date; nothing is interpolated.
pub fn delta_over_window(series: &[TimeSeriesRecord], days: i64) -> Option<i64> {
    let (latest, target) = window_bounds(series, days)?;
    Some(total_on(series, latest) as i64 - total_on(series, target) as i64)
}

fn window_bounds(series: &[TimeSeriesRecord], days: i64) -> Option<(NaiveDate, NaiveDate)> {
    let axis = reference_axis(series)?;
    let latest = axis.latest_date()?;
    let target = latest.checked_sub_signed(Duration::days(days))?;
    axis.value_on(target)?;
    Some((latest, target))
}

/// Headline figures of an outbreak at its latest date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutbreakSummary {
    pub latest_date: Option<NaiveDate>,
    pub confirmed: u64,
    pub deaths: u64,
    /// Not published for every region
    pub recovered: Option<u64>,
    /// Confirmed minus deaths minus recovered
    pub active: i64,
    /// Sum of the per-location recent deltas of the confirmed series
    pub recent_delta: i64,
    /// Deaths per 100 confirmed cases, `None` without confirmed cases
    pub death_ratio: Option<f64>,
    pub window_days: i64,
    /// Confirmed total `window_days` before the latest date
    pub confirmed_window_ago: Option<u64>,
}

impl OutbreakSummary {
    pub fn compute(
        confirmed: &[TimeSeriesRecord],
        deaths: &[TimeSeriesRecord],
        recovered: Option<&[TimeSeriesRecord]>,
        window_days: i64,
    ) -> Self {
        let confirmed_total = total_at_latest_date(confirmed);
        let deaths_total = total_at_latest_date(deaths);
        let recovered_total = recovered.map(total_at_latest_date);

        let active = confirmed_total as i64 - deaths_total as i64 - recovered_total.unwrap_or(0) as i64;
        let death_ratio =
            (confirmed_total > 0).then(|| deaths_total as f64 * 100.0 / confirmed_total as f64);

        Self {
            latest_date: reference_axis(confirmed).and_then(TimeSeriesRecord::latest_date),
            confirmed: confirmed_total,
            deaths: deaths_total,
            recovered: recovered_total,
            active,
            recent_delta: total_recent_delta(confirmed),
            death_ratio,
            window_days,
            confirmed_window_ago: window_bounds(confirmed, window_days)
                .map(|(_, target)| total_on(confirmed, target)),
        }
    }

    /// Deaths per 100 cases confirmed `window_days` earlier
    ///
    /// Closer to the true fatality rate during a growing outbreak, since
    /// deaths lag confirmations by roughly the duration of the illness.
    pub fn lagged_death_ratio(&self) -> Option<f64> {
        self.confirmed_window_ago
            .filter(|&confirmed| confirmed > 0)
            .map(|confirmed| self.deaths as f64 * 100.0 / confirmed as f64)
    }
}
