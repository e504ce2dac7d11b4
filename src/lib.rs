//! COVID-19 Time Series Processor Library
//!
//! A Rust library for turning the Johns Hopkins CSSE COVID-19 time series
//! (daily cumulative counts per location) into analysable records.
//!
//! This library provides tools for:
//! - Parsing global and US time series files with header-row date handling
//! - Loading the UID/ISO/FIPS lookup table for location and population lookups
//! - Merging time series with population data on country identity
//! - Deriving daily deltas, rankings, window deltas and peak days
//! - Loading independent input files concurrently

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod analytics;
        pub mod dataset_loader;
        pub mod location_directory;
        pub mod merge_engine;
        pub mod time_series_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DateValue, LocationEntry, LocationKey, MergedRecord, SeriesKind, TimeSeriesRecord,
};
pub use config::Config;

/// Result type alias for the COVID-19 processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for parsing, merging and analysing time series
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Row is structurally shorter or longer than the file's layout allows
    #[error("Malformed input in file '{file}' at row {row}: expected {expected} fields, found {found}")]
    MalformedInput {
        file: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Field could not be converted (non-numeric count, unparsable header date)
    #[error("Format error in file '{file}' at row {row}, column {column}: {message}")]
    Format {
        file: String,
        row: usize,
        column: usize,
        message: String,
    },

    /// Required input was absent
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// CSV tokenizer error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Background parse task failed to complete
    #[error("Background task failed: {message}")]
    Task { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a malformed input error for a row with the wrong field count
    pub fn malformed_input(
        file: impl Into<String>,
        row: usize,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::MalformedInput {
            file: file.into(),
            row,
            expected,
            found,
        }
    }

    /// Create a format error for a single field
    pub fn format(
        file: impl Into<String>,
        row: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Format {
            file: file.into(),
            row,
            column,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a background task error
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the content of an input file
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::Format { .. } | Self::CsvParsing { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
