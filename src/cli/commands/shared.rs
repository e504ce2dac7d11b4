//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress spinners and the
//! small formatting helpers every report uses.

use crate::app::models::SeriesKind;
use crate::app::services::dataset_loader::{Dataset, load_dataset};
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins; otherwise `-v`/`-q` and then the configured level apply.
pub fn setup_logging(args: &Args, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(config.logging.level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("covid19_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())?;

    if let Some(data_path) = &args.data_path {
        config = config.with_data_path(data_path.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Spinner shown on stderr while files load
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Load the given series (and the lookup table) behind a spinner
pub async fn load_with_progress(
    config: &Config,
    kinds: &[SeriesKind],
    with_locations: bool,
    show_progress: bool,
) -> Result<Dataset> {
    info!(
        "Loading {} series from {}",
        kinds.len(),
        config.data.base_path.display()
    );

    let spinner = create_spinner("Parsing time series files...", show_progress);
    let result = load_dataset(&config.data, kinds, with_locations).await;
    spinner.finish_and_clear();
    result
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Integer with thousands separators, e.g. `1,234,567`
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Unsigned variant of [`format_count`]
pub fn format_total(value: u64) -> String {
    format_count(i64::try_from(value).unwrap_or(i64::MAX))
}
