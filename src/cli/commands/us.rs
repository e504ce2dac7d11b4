//! US command implementation
//!
//! US totals and the top counties by new cases. The county populations come
//! from the deaths series, the only US file carrying a population column.

use super::shared::{format_count, format_total, load_with_progress, print_json};
use crate::app::models::{SeriesKind, TimeSeriesRecord};
use crate::app::services::analytics::{
    OutbreakSummary, PeakDay, PeakMetric, RankedLocation, below_uid_ceiling, peak_day,
    rank_by_recent_delta,
};
use crate::app::services::dataset_loader::Dataset;
use crate::cli::args::{Args, OutputFormat, UsArgs};
use crate::config::{AnalysisConfig, Config};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashMap;

/// Everything the US report shows
#[derive(Debug, Clone, Serialize)]
pub struct UsReport {
    pub summary: OutbreakSummary,
    pub peak: Option<PeakDay>,
    pub top_recent: Vec<RankedLocation>,
}

/// US command runner
pub async fn run_us(args: &Args, us: &UsArgs, config: Config) -> anyhow::Result<()> {
    let config = match us.top {
        Some(top) => config.with_top_n(top),
        None => config,
    };
    config.validate()?;

    let dataset = load_with_progress(
        &config,
        &[SeriesKind::ConfirmedUs, SeriesKind::DeathsUs],
        false,
        args.show_progress(),
    )
    .await
    .with_context(|| {
        format!(
            "Failed to load the US series from {}",
            config.data.time_series_path().display()
        )
    })?;

    let report = build_us_report(&dataset, &config.analysis)?;
    match us.format {
        OutputFormat::Text => print_us_report(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

/// Compute the US report from a loaded dataset
pub fn build_us_report(dataset: &Dataset, analysis: &AnalysisConfig) -> Result<UsReport> {
    let confirmed = dataset.require(SeriesKind::ConfirmedUs)?;
    let deaths = dataset.require(SeriesKind::DeathsUs)?;

    let populations = populations_by_uid(deaths);
    let top_recent = rank_by_recent_delta(
        below_uid_ceiling(confirmed, analysis.us_uid_ceiling),
        analysis.top_n,
        |record| {
            record
                .us_identity()
                .and_then(|identity| populations.get(identity.uid.as_str()))
                .copied()
                .unwrap_or(0)
        },
    );

    Ok(UsReport {
        summary: OutbreakSummary::compute(confirmed, deaths, None, analysis.window_days),
        peak: peak_day(confirmed, PeakMetric::Delta),
        top_recent,
    })
}

fn populations_by_uid(deaths: &[TimeSeriesRecord]) -> HashMap<&str, u64> {
    deaths
        .iter()
        .filter_map(|record| record.us_identity())
        .filter_map(|identity| Some((identity.uid.as_str(), identity.population?)))
        .collect()
}

fn print_us_report(report: &UsReport) {
    let summary = &report.summary;
    let date = summary
        .latest_date
        .map_or_else(|| "unknown".to_string(), |d| d.to_string());

    println!("{} {}\n", "Date of the data:".bright_cyan(), date);
    println!(
        "{}",
        format!("US confirmed cases: {}", format_total(summary.confirmed)).red()
    );
    println!(
        "{}",
        format!("US last 24 hours:   {}", format_count(summary.recent_delta)).red()
    );
    println!("US deaths:          {}", format_total(summary.deaths));
    if let Some(ratio) = summary.death_ratio {
        println!("US infection death ratio: {:.3}%", ratio);
    }
    if let Some(peak) = report.peak {
        println!(
            "\nThe day with the most new cases in the US: {} with {}",
            peak.date.to_string().bold(),
            format_count(peak.value)
        );
    }

    println!(
        "\n{}",
        format!(
            "Top {} counties by cases in the past 24 hours:",
            report.top_recent.len()
        )
        .bright_yellow()
    );
    println!(
        "{:>3} | {:<40} | {:>13} | {:>13} | {:>10}",
        "Nr.", "County", "Last 24 hours", "Total", "% of pop."
    );
    println!("{}", "-".repeat(92));
    for row in &report.top_recent {
        println!(
            "{:>3} | {:<40} | {:>13} | {:>13} | {:>9.3}%",
            row.rank,
            row.name,
            format_count(row.recent_delta),
            format_total(row.total),
            row.percentage_of_population
        );
    }
    println!("{}", "=".repeat(92));
}
