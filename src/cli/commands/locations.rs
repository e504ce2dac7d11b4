//! Locations command implementation
//!
//! Shows a country's lookup table entries: the country-level row, its
//! population and the subdivisions grouped by numeric country code.

use super::shared::{create_spinner, format_total, print_json};
use crate::Error;
use crate::app::models::LocationEntry;
use crate::app::services::location_directory::LocationDirectory;
use crate::cli::args::{Args, LocationsArgs, OutputFormat};
use crate::config::Config;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::task;

/// A country as described by the lookup table
#[derive(Debug, Clone, Serialize)]
pub struct CountryLocations {
    pub country: String,
    pub population: u64,
    pub country_level: Option<LocationEntry>,
    pub subdivisions: BTreeMap<String, Vec<LocationEntry>>,
}

impl CountryLocations {
    /// Collect a country's entries; `None` if the table does not know it
    pub fn from_directory(directory: &LocationDirectory, country: &str) -> Option<Self> {
        if directory.find_by_country(country).is_empty() {
            return None;
        }

        Some(Self {
            country: country.to_string(),
            population: directory.country_population(country),
            country_level: directory.find_country_level(country).cloned(),
            subdivisions: directory
                .subdivisions_by_numeric_code(country)
                .into_iter()
                .map(|(code, entries)| (code, entries.into_iter().cloned().collect()))
                .collect(),
        })
    }
}

/// Locations command runner
pub async fn run_locations(
    args: &Args,
    locations: &LocationsArgs,
    config: Config,
) -> anyhow::Result<()> {
    let path = config.data.lookup_table_path();

    let spinner = create_spinner("Loading lookup table...", args.show_progress());
    let load_path = path.clone();
    let directory = task::spawn_blocking(move || LocationDirectory::parse(&load_path))
        .await
        .map_err(|e| Error::task(format!("Loading the lookup table did not complete: {}", e)))?
        .with_context(|| format!("Failed to load lookup table {}", path.display()));
    spinner.finish_and_clear();
    let directory = directory?;

    let report = CountryLocations::from_directory(&directory, &locations.country).ok_or_else(|| {
        Error::invalid_argument(
            "country",
            format!("'{}' is not in the lookup table", locations.country),
        )
    })?;

    match locations.format {
        OutputFormat::Text => print_locations(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn print_locations(report: &CountryLocations) {
    println!(
        "{} {}",
        report.country.bold(),
        format!("(population {})", format_total(report.population)).bright_cyan()
    );

    match &report.country_level {
        Some(entry) => println!(
            "  Country-level entry: UID {} ({}/{})",
            entry.uid, entry.iso2, entry.iso3
        ),
        None => println!("  {}", "No country-level entry".yellow()),
    }

    for (code, entries) in &report.subdivisions {
        println!(
            "\n{} {} ({} subdivisions)",
            "Numeric code".bright_yellow(),
            code,
            entries.len()
        );
        for entry in entries {
            let population = entry
                .population
                .map_or_else(|| "-".to_string(), format_total);
            println!("  {:<10} {:<45} {:>13}", entry.uid, entry.combined_key, population);
        }
    }
}
