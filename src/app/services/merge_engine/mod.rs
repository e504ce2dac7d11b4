//! Merge engine joining time series with the location directory
//!
//! The global series is keyed by `(province/state, country/region)` while the
//! lookup table carries numeric codes and populations. This module joins the
//! two on country identity and produces one population-annotated
//! [`MergedRecord`](crate::app::models::MergedRecord) per country-level entry.
//!
//! # Architecture
//!
//! - [`policy`] - How several matching series rows collapse into one country series
//! - [`aggregation`] - Element-wise aggregation of matching rows
//! - [`merger`] - The [`MergeEngine`] and the join itself
//! - [`stats`] - Merge statistics and result structure
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use covid19_processor::app::services::merge_engine::{MergeEngine, MergePolicy};
//! # fn example(
//! #     series: Vec<covid19_processor::TimeSeriesRecord>,
//! #     entries: Vec<covid19_processor::LocationEntry>,
//! # ) -> covid19_processor::Result<()> {
//! let engine = MergeEngine::new(MergePolicy::Sum);
//! let merged = engine.merge_by_country(Some(series.as_slice()), Some(entries.as_slice()))?;
//! println!("{} countries", merged.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod merger;
pub mod policy;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use merger::{MergeEngine, merge};
pub use policy::MergePolicy;
pub use stats::{MergeResult, MergeStats};
