//! Loading the input files of one run
//!
//! The series files and the lookup table are independent, so each is parsed
//! on the blocking thread pool and the results are joined. Any failure aborts
//! the whole load. Discovery walks the data directory to report which series
//! files exist before anything is parsed.

use crate::app::models::{SeriesKind, TimeSeriesRecord};
use crate::app::services::location_directory::LocationDirectory;
use crate::app::services::time_series_parser::TimeSeriesParser;
use crate::config::DataConfig;
use crate::constants::DEFAULT_LOOKUP_TABLE_FILE;
use crate::{Error, Result};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Parsed inputs of one run
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    series: HashMap<SeriesKind, Vec<TimeSeriesRecord>>,
    locations: Option<LocationDirectory>,
}

impl Dataset {
    pub fn series(&self, kind: SeriesKind) -> Option<&[TimeSeriesRecord]> {
        self.series.get(&kind).map(Vec::as_slice)
    }

    /// A series that must have been loaded
    pub fn require(&self, kind: SeriesKind) -> Result<&[TimeSeriesRecord]> {
        self.series(kind).ok_or_else(|| {
            Error::invalid_argument(kind.as_str(), "series was not part of the load request")
        })
    }

    pub fn locations(&self) -> Option<&LocationDirectory> {
        self.locations.as_ref()
    }

    /// The lookup table, which must have been loaded
    pub fn require_locations(&self) -> Result<&LocationDirectory> {
        self.locations
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("locations", "lookup table was not loaded"))
    }

    pub fn loaded_kinds(&self) -> impl Iterator<Item = SeriesKind> + '_ {
        self.series.keys().copied()
    }
}

enum Job {
    Series(SeriesKind, PathBuf),
    Locations(PathBuf),
}

enum Loaded {
    Series(SeriesKind, Vec<TimeSeriesRecord>),
    Locations(LocationDirectory),
}

impl Job {
    fn run(self) -> Result<Loaded> {
        match self {
            Job::Series(kind, path) => {
                let result = TimeSeriesParser::for_kind(kind).parse_file(&path)?;
                Ok(Loaded::Series(kind, result.records))
            }
            Job::Locations(path) => Ok(Loaded::Locations(LocationDirectory::parse(&path)?)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Job::Series(kind, _) => kind.to_string(),
            Job::Locations(_) => "lookup table".to_string(),
        }
    }
}

/// Parse the requested series (and optionally the lookup table) concurrently
///
/// # Errors
/// Returns the first parse error of any file, or `Error::Task` if a parse
/// task panicked.
pub async fn load_dataset(
    config: &DataConfig,
    kinds: &[SeriesKind],
    with_locations: bool,
) -> Result<Dataset> {
    let start_time = Instant::now();

    let mut jobs: Vec<Job> = kinds
        .iter()
        .map(|&kind| Job::Series(kind, config.series_path(kind)))
        .collect();
    if with_locations {
        jobs.push(Job::Locations(config.lookup_table_path()));
    }
    info!("Loading {} input files", jobs.len());

    let loaded = try_join_all(jobs.into_iter().map(|job| async move {
        let name = job.describe();
        task::spawn_blocking(move || job.run())
            .await
            .map_err(|e| Error::task(format!("Parsing {} did not complete: {}", name, e)))?
    }))
    .await?;

    let mut dataset = Dataset::default();
    for item in loaded {
        match item {
            Loaded::Series(kind, records) => {
                debug!("{}: {} records", kind, records.len());
                dataset.series.insert(kind, records);
            }
            Loaded::Locations(directory) => {
                debug!("Lookup table: {} entries", directory.len());
                dataset.locations = Some(directory);
            }
        }
    }

    info!(
        "Loaded {} series in {:.2}s",
        dataset.series.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(dataset)
}

/// Input files found below a data directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveredSources {
    /// Series files in discovery order, first match per kind
    pub series: Vec<(SeriesKind, PathBuf)>,
    pub lookup_table: Option<PathBuf>,
    pub files_scanned: usize,
}

impl DiscoveredSources {
    pub fn path(&self, kind: SeriesKind) -> Option<&Path> {
        self.series
            .iter()
            .find(|(found, _)| *found == kind)
            .map(|(_, path)| path.as_path())
    }

    /// Known series kinds with no file on disk
    pub fn missing(&self) -> Vec<SeriesKind> {
        SeriesKind::ALL
            .iter()
            .copied()
            .filter(|&kind| self.path(kind).is_none())
            .collect()
    }
}

/// Walk `dir` (two levels deep) for series files and the lookup table
///
/// File names are matched case-insensitively.
///
/// # Errors
/// * Returns `Error::FileNotFound` if `dir` does not exist
/// * Returns `Error::DirectoryTraversal` if the walk fails
pub fn discover_sources(dir: &Path) -> Result<DiscoveredSources> {
    if !dir.is_dir() {
        return Err(Error::file_not_found(dir.display().to_string()));
    }

    let mut sources = DiscoveredSources::default();
    for entry in WalkDir::new(dir).max_depth(2).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        sources.files_scanned += 1;

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if let Some(kind) = SeriesKind::from_file_name(name) {
            if sources.path(kind).is_none() {
                debug!("Found {} at {}", kind, entry.path().display());
                sources.series.push((kind, entry.path().to_path_buf()));
            }
        } else if name.eq_ignore_ascii_case(DEFAULT_LOOKUP_TABLE_FILE)
            && sources.lookup_table.is_none()
        {
            sources.lookup_table = Some(entry.path().to_path_buf());
        }
    }

    info!(
        "Discovered {} series files ({} files scanned) in {}",
        sources.series.len(),
        sources.files_scanned,
        dir.display()
    );
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::location_directory::tests::LOOKUP_TABLE;
    use crate::app::services::time_series_parser::tests::{
        GLOBAL_SERIES, US_DEATHS_SERIES, write_fixture,
    };
    use std::fs;
    use tempfile::TempDir;

    fn data_dir() -> (TempDir, DataConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = DataConfig {
            base_path: temp_dir.path().to_path_buf(),
            ..DataConfig::default()
        };
        let series_dir = config.time_series_path();
        fs::create_dir_all(&series_dir).unwrap();

        write_fixture(&series_dir, SeriesKind::ConfirmedGlobal.file_name(), GLOBAL_SERIES);
        write_fixture(&series_dir, SeriesKind::DeathsUs.file_name(), US_DEATHS_SERIES);
        write_fixture(temp_dir.path(), DEFAULT_LOOKUP_TABLE_FILE, LOOKUP_TABLE);
        (temp_dir, config)
    }

    #[tokio::test]
    async fn test_load_dataset() {
        let (_temp_dir, config) = data_dir();

        let dataset = load_dataset(
            &config,
            &[SeriesKind::ConfirmedGlobal, SeriesKind::DeathsUs],
            true,
        )
        .await
        .unwrap();

        assert_eq!(dataset.require(SeriesKind::ConfirmedGlobal).unwrap().len(), 4);
        assert_eq!(dataset.require(SeriesKind::DeathsUs).unwrap().len(), 3);
        assert_eq!(dataset.require_locations().unwrap().len(), 7);
        assert!(dataset.series(SeriesKind::RecoveredGlobal).is_none());
        assert!(matches!(
            dataset.require(SeriesKind::RecoveredGlobal),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_without_locations() {
        let (_temp_dir, config) = data_dir();

        let dataset = load_dataset(&config, &[SeriesKind::ConfirmedGlobal], false)
            .await
            .unwrap();

        assert!(dataset.locations().is_none());
        assert_eq!(dataset.loaded_kinds().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_aborts_load() {
        let (_temp_dir, config) = data_dir();

        let result = load_dataset(
            &config,
            &[SeriesKind::ConfirmedGlobal, SeriesKind::RecoveredGlobal],
            true,
        )
        .await;

        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_discover_sources() {
        let (temp_dir, config) = data_dir();
        // Case differs from the published name
        write_fixture(
            &config.time_series_path(),
            "TIME_SERIES_COVID19_RECOVERED_GLOBAL.CSV",
            GLOBAL_SERIES,
        );
        write_fixture(&config.time_series_path(), "README.md", "notes");

        let sources = discover_sources(temp_dir.path()).unwrap();

        assert_eq!(sources.series.len(), 3);
        assert!(sources.path(SeriesKind::RecoveredGlobal).is_some());
        assert_eq!(
            sources.lookup_table.as_deref(),
            Some(config.lookup_table_path().as_path())
        );
        assert_eq!(
            sources.missing(),
            vec![SeriesKind::DeathsGlobal, SeriesKind::ConfirmedUs]
        );
        assert_eq!(sources.files_scanned, 5);
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = discover_sources(&temp_dir.path().join("absent"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
