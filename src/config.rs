//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command line flags (applied by the CLI
//! through the `with_*` builders). The resulting value is passed explicitly
//! to the loader; nothing reads paths from global state.
//!
//! ```toml
//! [data]
//! base_path = "COVID-19/csse_covid_19_data"
//!
//! [analysis]
//! top_n = 10
//! merge_policy = "last-match"
//! ```

use crate::app::models::SeriesKind;
use crate::app::services::analytics::PeakMetric;
use crate::app::services::merge_engine::MergePolicy;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_PATH, DEFAULT_FOCUS_COUNTRY,
    DEFAULT_LOOKUP_TABLE_FILE, DEFAULT_TIME_SERIES_DIR, DEFAULT_TOP_N, DEFAULT_US_UID_CEILING,
    DEFAULT_WINDOW_DAYS, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Where the input files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the CSSE data checkout
    pub base_path: PathBuf,

    /// Time series sub-directory, relative to `base_path`
    pub time_series_dir: String,

    /// Lookup table file name, relative to `base_path`
    pub lookup_table_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            time_series_dir: DEFAULT_TIME_SERIES_DIR.to_string(),
            lookup_table_file: DEFAULT_LOOKUP_TABLE_FILE.to_string(),
        }
    }
}

impl DataConfig {
    /// Directory holding the time series files
    pub fn time_series_path(&self) -> PathBuf {
        self.base_path.join(&self.time_series_dir)
    }

    /// Full path of one series file
    pub fn series_path(&self, kind: SeriesKind) -> PathBuf {
        self.time_series_path().join(kind.file_name())
    }

    pub fn lookup_table_path(&self) -> PathBuf {
        self.base_path.join(&self.lookup_table_file)
    }
}

/// Parameters of the derived reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows in ranked tables
    pub top_n: usize,

    /// Days between the latest date and the comparison date
    pub window_days: i64,

    pub merge_policy: MergePolicy,

    pub peak_metric: PeakMetric,

    /// Country always shown next to the percentage ranking
    pub focus_country: String,

    /// US rankings keep only UIDs strictly below this value
    pub us_uid_ceiling: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            window_days: DEFAULT_WINDOW_DAYS,
            merge_policy: MergePolicy::default(),
            peak_metric: PeakMetric::default(),
            focus_country: DEFAULT_FOCUS_COUNTRY.to_string(),
            us_uid_ceiling: DEFAULT_US_UID_CEILING,
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing level filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when neither `RUST_LOG` nor `-v`/`-q` is given
    pub level: LogLevel,
}

/// Complete processor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// * Returns `Error::FileNotFound` if the file does not exist
    /// * Returns `Error::Configuration` for invalid TOML or values
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::io(format!("Failed to read config file {}", path.display()), e)
            }
        })?;

        debug!("Loaded configuration from {}", path.display());
        contents.parse()
    }

    /// Per-user configuration file, e.g. `~/.config/covid19-processor/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Defaults, then the given (or per-user) file, then the environment
    ///
    /// An explicitly given file must exist; the per-user file is optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        let config = config.with_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(env_vars::DATA_PATH).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides data path: {}", env_vars::DATA_PATH, path);
            self.data.base_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(env_vars::TOP_N) {
            self.analysis.top_n = value.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    env_vars::TOP_N,
                    value
                ))
            })?;
        }

        if let Some(value) = lookup(env_vars::MERGE_POLICY) {
            self.analysis.merge_policy = value
                .parse()
                .map_err(|e: Error| Error::configuration(format!("{}: {}", env_vars::MERGE_POLICY, e)))?;
        }

        Ok(self)
    }

    pub fn with_data_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.data.base_path = base_path.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.analysis.top_n = top_n;
        self
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.analysis.window_days = window_days;
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.analysis.merge_policy = policy;
        self
    }

    pub fn with_peak_metric(mut self, metric: PeakMetric) -> Self {
        self.analysis.peak_metric = metric;
        self
    }

    pub fn with_focus_country(mut self, country: impl Into<String>) -> Self {
        self.analysis.focus_country = country.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.top_n == 0 {
            return Err(Error::configuration("analysis.top_n must be at least 1"));
        }
        if self.analysis.window_days < 0 {
            return Err(Error::configuration("analysis.window_days must not be negative"));
        }
        if self.data.base_path.as_os_str().is_empty() {
            return Err(Error::configuration("data.base_path must not be empty"));
        }
        if self.data.time_series_dir.trim().is_empty() {
            return Err(Error::configuration("data.time_series_dir must not be empty"));
        }
        if self.data.lookup_table_file.trim().is_empty() {
            return Err(Error::configuration("data.lookup_table_file must not be empty"));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
