//! Analytics over parsed and merged time series
//!
//! Stateless functions computing totals, window deltas, rankings and peak
//! days. Header records are always skipped. The date axis of a series is
//! taken from its first data record, since every record of one parsed file
//! shares the header's dates.
//!
//! - [`summary`] - Totals at the latest date, window deltas, outbreak summary
//! - [`ranking`] - Top-N by recent delta and by percentage of population
//! - [`peak`] - Day with the highest combined delta (or cumulative count)

pub mod peak;
pub mod ranking;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use peak::{PeakDay, PeakMetric, peak_day, peak_delta_day};
pub use ranking::{
    RankedLocation, below_uid_ceiling, guarded_percentage, percentage_of_population,
    percentage_rank, rank_by_recent_delta, top_n_by_percentage_of_population,
    top_n_by_recent_delta,
};
pub use summary::{
    OutbreakSummary, delta_over_window, reference_axis, total_at_latest_date, total_on,
    total_recent_delta,
};
