//! Command-line argument definitions for the COVID-19 processor
//!
//! This module defines the CLI interface using the clap derive API. Global
//! flags (data path, config file, verbosity) apply to every subcommand.

use crate::app::services::analytics::PeakMetric;
use crate::app::services::merge_engine::MergePolicy;
use crate::config::LogLevel;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the COVID-19 time series processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "covid19-processor",
    version,
    about = "Analyse the Johns Hopkins CSSE COVID-19 time series",
    long_about = "Parses the Johns Hopkins CSSE COVID-19 time series files, joins them with the \
                  UID/ISO/FIPS lookup table and reports totals, daily deltas, top-N rankings, \
                  population percentages and the day with the most new cases."
)]
pub struct Args {
    /// Root of the CSSE data checkout (the `csse_covid_19_data` directory)
    #[arg(
        long = "data-path",
        value_name = "PATH",
        global = true,
        help = "Path to the csse_covid_19_data directory"
    )]
    pub data_path: Option<PathBuf>,

    /// Configuration file; defaults to the per-user config file if present
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Configuration file (TOML)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// Log level from `-v`/`-q`, falling back to the configured level
    pub fn get_log_level(&self, configured: LogLevel) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => configured.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Progress spinners are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Worldwide report: totals, peak day, top-N by new cases and by population share
    Global(GlobalArgs),
    /// US report: totals, peak day and top-N counties by new cases
    Us(UsArgs),
    /// Lookup table entries of one country, grouped by numeric code
    Locations(LocationsArgs),
    /// List the series files present in the data directory
    Sources(SourcesArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct GlobalArgs {
    #[arg(long = "top", value_name = "N", help = "Rows in ranked tables")]
    pub top: Option<usize>,

    /// Days between the latest date and the comparison date
    #[arg(long = "window-days", value_name = "DAYS")]
    pub window_days: Option<i64>,

    /// How provinces of one country are combined for the population ranking
    #[arg(long = "merge-policy", value_enum)]
    pub merge_policy: Option<MergePolicy>,

    /// Field the peak day is ranked by
    #[arg(long = "peak-metric", value_enum)]
    pub peak_metric: Option<PeakMetric>,

    /// Country always shown next to the percentage ranking
    #[arg(long = "focus", value_name = "COUNTRY")]
    pub focus: Option<String>,

    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct UsArgs {
    #[arg(long = "top", value_name = "N", help = "Rows in ranked tables")]
    pub top: Option<usize>,

    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct LocationsArgs {
    /// Country/region exactly as spelled in the lookup table
    #[arg(long = "country", value_name = "COUNTRY")]
    pub country: String,

    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct SourcesArgs {
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// JSON for scripting
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = Args::try_parse_from([
            "covid19-processor",
            "--data-path",
            "/data",
            "global",
            "--top",
            "5",
            "--merge-policy",
            "last-match",
            "--peak-metric",
            "cumulative",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.data_path, Some(PathBuf::from("/data")));
        match args.command {
            Some(Commands::Global(global)) => {
                assert_eq!(global.top, Some(5));
                assert_eq!(global.merge_policy, Some(MergePolicy::LastMatch));
                assert_eq!(global.peak_metric, Some(PeakMetric::Cumulative));
                assert_eq!(global.format, OutputFormat::Json);
                assert_eq!(global.window_days, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["covid19-processor", "sources", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Some(Commands::Sources(_))));
    }

    #[test]
    fn test_locations_requires_country() {
        assert!(Args::try_parse_from(["covid19-processor", "locations"]).is_err());

        let args =
            Args::try_parse_from(["covid19-processor", "locations", "--country", "Canada"]).unwrap();
        match args.command {
            Some(Commands::Locations(locations)) => assert_eq!(locations.country, "Canada"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::try_parse_from(["covid19-processor", "us"]).unwrap();
        assert_eq!(args.get_log_level(LogLevel::Warn), "warn");
        assert_eq!(args.get_log_level(LogLevel::Debug), "debug");

        args.verbose = 1;
        assert_eq!(args.get_log_level(LogLevel::Warn), "info");
        args.verbose = 3;
        assert_eq!(args.get_log_level(LogLevel::Warn), "trace");

        args.quiet = true;
        assert_eq!(args.get_log_level(LogLevel::Warn), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["covid19-processor", "-q", "-v", "sources"]).is_err());
    }
}
