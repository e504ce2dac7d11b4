//! Top-N rankings
//!
//! Sorting is stable everywhere: records with equal keys keep their input order.

use crate::app::models::{MergedRecord, TimeSeriesRecord};
use serde::Serialize;

/// One row of a ranking, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLocation {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub recent_delta: i64,
    pub total: u64,
    pub population: u64,
    /// Total as a percentage of the population, 0 when the population is unknown
    pub percentage_of_population: f64,
}

/// Data records ordered by descending recent delta, first `n`
pub fn top_n_by_recent_delta<'a, I>(series: I, n: usize) -> Vec<&'a TimeSeriesRecord>
where
    I: IntoIterator<Item = &'a TimeSeriesRecord>,
{
    let mut ranked: Vec<(i64, &TimeSeriesRecord)> = series
        .into_iter()
        .filter(|record| !record.is_header())
        .map(|record| (record.recent_delta(), record))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked.into_iter().take(n).map(|(_, record)| record).collect()
}

/// Top-N by recent delta annotated with populations from `population_of`
pub fn rank_by_recent_delta<'a, I, F>(series: I, n: usize, population_of: F) -> Vec<RankedLocation>
where
    I: IntoIterator<Item = &'a TimeSeriesRecord>,
    F: Fn(&TimeSeriesRecord) -> u64,
{
    top_n_by_recent_delta(series, n)
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let population = population_of(record);
            let total = record.latest_cumulative();
            RankedLocation {
                rank: index + 1,
                name: location_name(record),
                recent_delta: record.recent_delta(),
                total,
                population,
                percentage_of_population: guarded_percentage(total, population),
            }
        })
        .collect()
}

/// US records whose numeric UID is below `ceiling`
///
/// Records without a US identity or with a non-numeric UID are dropped.
pub fn below_uid_ceiling(
    series: &[TimeSeriesRecord],
    ceiling: u64,
) -> impl Iterator<Item = &TimeSeriesRecord> {
    series.iter().filter(move |record| {
        record
            .us_identity()
            .and_then(|identity| identity.uid_number())
            .is_some_and(|uid| uid < ceiling)
    })
}

/// `count` as a percentage of `population`, 0 for a zero population
pub fn guarded_percentage(count: u64, population: u64) -> f64 {
    if population == 0 {
        0.0
    } else {
        count as f64 * 100.0 / population as f64
    }
}

pub fn percentage_of_population(record: &MergedRecord) -> f64 {
    record.percentage_of_population()
}

/// Merged countries by descending percentage of population, first `n`
///
/// Header records, unknown populations and non-finite percentages are excluded.
pub fn top_n_by_percentage_of_population(merged: &[MergedRecord], n: usize) -> Vec<&MergedRecord> {
    let mut ranked = ranked_by_percentage(merged);
    ranked.truncate(n);
    ranked
}

/// 1-based position of a country in the full percentage ranking
pub fn percentage_rank<'a>(
    merged: &'a [MergedRecord],
    country: &str,
) -> Option<(usize, &'a MergedRecord)> {
    ranked_by_percentage(merged)
        .into_iter()
        .enumerate()
        .find(|(_, record)| record.country_or_region() == country)
        .map(|(index, record)| (index + 1, record))
}

fn ranked_by_percentage(merged: &[MergedRecord]) -> Vec<&MergedRecord> {
    let mut ranked: Vec<&MergedRecord> = merged
        .iter()
        .filter(|record| !record.is_header() && record.population() > 0)
        .filter(|record| record.percentage_of_population().is_finite())
        .collect();
    ranked.sort_by(|a, b| {
        b.percentage_of_population()
            .total_cmp(&a.percentage_of_population())
    });
    ranked
}

fn location_name(record: &TimeSeriesRecord) -> String {
    record
        .us_identity()
        .map(|identity| identity.combined_key.as_str())
        .filter(|key| !key.is_empty())
        .map_or_else(|| record.location_key().display_name(), str::to_string)
}
