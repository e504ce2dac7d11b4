//! Sources command implementation
//!
//! Lists which series files and lookup table exist below the data path.

use super::shared::print_json;
use crate::app::models::SeriesKind;
use crate::app::services::dataset_loader::discover_sources;
use crate::cli::args::{OutputFormat, SourcesArgs};
use crate::config::Config;
use anyhow::Context;
use colored::Colorize;

/// Sources command runner
pub async fn run_sources(sources: &SourcesArgs, config: Config) -> anyhow::Result<()> {
    let base_path = config.data.base_path.clone();
    let discovered = discover_sources(&base_path)
        .with_context(|| format!("Failed to scan {}", base_path.display()))?;

    if sources.format == OutputFormat::Json {
        return print_json(&discovered);
    }

    println!(
        "{} {} ({} files scanned)\n",
        "Data path:".bright_cyan(),
        base_path.display(),
        discovered.files_scanned
    );
    for kind in SeriesKind::ALL {
        match discovered.path(kind) {
            Some(path) => println!("  {} {:<18} {}", "✓".green(), kind, path.display()),
            None => println!("  {} {:<18} {}", "✗".red(), kind, "missing".dimmed()),
        }
    }
    match &discovered.lookup_table {
        Some(path) => println!("  {} {:<18} {}", "✓".green(), "lookup-table", path.display()),
        None => println!("  {} {:<18} {}", "✗".red(), "lookup-table", "missing".dimmed()),
    }
    Ok(())
}
