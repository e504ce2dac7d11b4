//! Global command implementation
//!
//! Worldwide totals, the peak day, the top countries by new cases and the
//! top countries by share of population infected.

use super::shared::{format_count, format_total, load_with_progress, print_json};
use crate::app::models::{MergedRecord, SeriesKind};
use crate::app::services::analytics::{
    OutbreakSummary, PeakDay, PeakMetric, RankedLocation, peak_day, percentage_rank,
    rank_by_recent_delta, top_n_by_percentage_of_population,
};
use crate::app::services::dataset_loader::Dataset;
use crate::app::services::merge_engine::{MergeEngine, MergePolicy};
use crate::cli::args::{Args, GlobalArgs, OutputFormat};
use crate::config::{AnalysisConfig, Config};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

/// One row of the population percentage ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageRow {
    pub rank: usize,
    pub country: String,
    pub population: u64,
    pub total: u64,
    pub percentage_of_population: f64,
}

impl PercentageRow {
    fn new(rank: usize, record: &MergedRecord) -> Self {
        Self {
            rank,
            country: record.country_or_region().to_string(),
            population: record.population(),
            total: record.latest_cumulative(),
            percentage_of_population: record.percentage_of_population(),
        }
    }
}

/// Everything the global report shows
#[derive(Debug, Clone, Serialize)]
pub struct GlobalReport {
    pub merge_policy: MergePolicy,
    pub peak_metric: PeakMetric,
    pub summary: OutbreakSummary,
    pub peak: Option<PeakDay>,
    pub top_recent: Vec<RankedLocation>,
    pub top_by_percentage: Vec<PercentageRow>,
    /// The focus country's position in the full percentage ranking
    pub focus: Option<PercentageRow>,
}

/// Global command runner
pub async fn run_global(args: &Args, global: &GlobalArgs, config: Config) -> anyhow::Result<()> {
    let config = apply_global_overrides(config, global);
    config.validate()?;

    let mut kinds = vec![SeriesKind::ConfirmedGlobal, SeriesKind::DeathsGlobal];
    if config.data.series_path(SeriesKind::RecoveredGlobal).is_file() {
        kinds.push(SeriesKind::RecoveredGlobal);
    } else {
        warn!("Recovered series not found, active cases will exclude recoveries");
    }

    let dataset = load_with_progress(&config, &kinds, true, args.show_progress())
        .await
        .with_context(|| {
            format!(
                "Failed to load the global series from {}",
                config.data.base_path.display()
            )
        })?;

    let report = build_global_report(&dataset, &config.analysis)?;
    match global.format {
        OutputFormat::Text => print_global_report(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn apply_global_overrides(mut config: Config, global: &GlobalArgs) -> Config {
    if let Some(top) = global.top {
        config = config.with_top_n(top);
    }
    if let Some(window_days) = global.window_days {
        config = config.with_window_days(window_days);
    }
    if let Some(policy) = global.merge_policy {
        config = config.with_merge_policy(policy);
    }
    if let Some(metric) = global.peak_metric {
        config = config.with_peak_metric(metric);
    }
    if let Some(focus) = &global.focus {
        config = config.with_focus_country(focus.clone());
    }
    config
}

/// Compute the global report from a loaded dataset
///
/// Requires the confirmed and deaths series and the lookup table; the
/// recovered series is optional.
pub fn build_global_report(dataset: &Dataset, analysis: &AnalysisConfig) -> Result<GlobalReport> {
    let confirmed = dataset.require(SeriesKind::ConfirmedGlobal)?;
    let deaths = dataset.require(SeriesKind::DeathsGlobal)?;
    let recovered = dataset.series(SeriesKind::RecoveredGlobal);
    let directory = dataset.require_locations()?;

    let summary = OutbreakSummary::compute(confirmed, deaths, recovered, analysis.window_days);
    let peak = peak_day(confirmed, analysis.peak_metric);

    let top_recent = rank_by_recent_delta(confirmed, analysis.top_n, |record| {
        directory.country_population(record.country_or_region())
    });

    let merged = MergeEngine::new(analysis.merge_policy)
        .merge_by_country(Some(confirmed), Some(directory.entries()))?;
    let top_by_percentage = top_n_by_percentage_of_population(&merged, analysis.top_n)
        .into_iter()
        .enumerate()
        .map(|(index, record)| PercentageRow::new(index + 1, record))
        .collect();
    let focus = percentage_rank(&merged, &analysis.focus_country)
        .map(|(rank, record)| PercentageRow::new(rank, record));

    info!(
        "Global report: {} confirmed, {} ranked countries",
        summary.confirmed,
        merged.len()
    );

    Ok(GlobalReport {
        merge_policy: analysis.merge_policy,
        peak_metric: analysis.peak_metric,
        summary,
        peak,
        top_recent,
        top_by_percentage,
        focus,
    })
}

fn print_global_report(report: &GlobalReport) {
    let summary = &report.summary;
    let date = summary
        .latest_date
        .map_or_else(|| "unknown".to_string(), |d| d.to_string());

    println!("{} {}\n", "Date of the data:".bright_cyan(), date);
    println!(
        "{}",
        format!("Worldwide confirmed cases: {}", format_total(summary.confirmed)).red()
    );
    println!(
        "{}",
        format!("Worldwide last 24 hours:   {}", format_count(summary.recent_delta)).red()
    );
    println!("Worldwide deaths:          {}", format_total(summary.deaths));
    if let Some(recovered) = summary.recovered {
        println!(
            "{}",
            format!("Worldwide recovered:       {}", format_total(recovered)).green()
        );
    }
    println!(
        "{}",
        format!("Worldwide active cases:    {}", format_count(summary.active)).cyan()
    );
    if let Some(ratio) = summary.death_ratio {
        println!("Infection death ratio:     {:.3}%", ratio);
    }
    if let Some(ratio) = summary.lagged_death_ratio() {
        println!(
            "Death ratio vs. cases {} days earlier: {:.3}%",
            summary.window_days, ratio
        );
    }

    if let Some(peak) = report.peak {
        let label = match report.peak_metric {
            PeakMetric::Delta => "new cases",
            PeakMetric::Cumulative => "cumulative cases",
        };
        println!(
            "\nThe day with the most {} worldwide: {} with {}",
            label,
            peak.date.to_string().bold(),
            format_count(peak.value)
        );
    }

    println!(
        "\n{}",
        format!(
            "Top {} countries by cases in the past 24 hours:",
            report.top_recent.len()
        )
        .bright_yellow()
    );
    println!(
        "{:>3} | {:<32} | {:>13} | {:>13} | {:>10}",
        "Nr.", "Country", "Last 24 hours", "Total", "% of pop."
    );
    println!("{}", "-".repeat(84));
    for row in &report.top_recent {
        println!(
            "{:>3} | {:<32} | {:>13} | {:>13} | {:>9.3}%",
            row.rank,
            row.name,
            format_count(row.recent_delta),
            format_total(row.total),
            row.percentage_of_population
        );
    }
    println!("{}", "=".repeat(84));
    println!(
        "{:<38} | {:>13} | {:>13}",
        "Summary",
        format_count(report.top_recent.iter().map(|r| r.recent_delta).sum()),
        format_total(report.top_recent.iter().map(|r| r.total).sum())
    );

    println!(
        "\n{} (merge policy: {})",
        format!(
            "Top {} countries by share of population infected:",
            report.top_by_percentage.len()
        )
        .bright_yellow(),
        report.merge_policy
    );
    println!(
        "{:>3} | {:<32} | {:>13} | {:>13} | {:>10}",
        "Nr.", "Country", "Population", "Infected", "% of pop."
    );
    println!("{}", "-".repeat(84));
    for row in &report.top_by_percentage {
        print_percentage_row(row);
    }
    if let Some(focus) = &report.focus
        && !report.top_by_percentage.iter().any(|row| row.rank == focus.rank)
    {
        println!("{:>3} |", "..");
        print_percentage_row(focus);
    }
    println!("{}", "=".repeat(84));
}

fn print_percentage_row(row: &PercentageRow) {
    println!(
        "{:>3} | {:<32} | {:>13} | {:>13} | {:>9.2}%",
        row.rank,
        row.country,
        format_total(row.population),
        format_total(row.total),
        row.percentage_of_population
    );
}
