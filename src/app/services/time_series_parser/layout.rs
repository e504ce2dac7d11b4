//! Column layout of the different time series shapes
//!
//! The global series carries four identity columns, the US series eleven,
//! and the US deaths series adds a population column in front of the dates.
//! A layout is derived from the first date column so callers can pass the
//! plain column index.

use crate::app::models::SeriesKind;
use crate::constants::{global_columns, us_columns};
use crate::{Error, Result};

/// Which identity columns precede the dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityShape {
    /// `Province/State, Country/Region, Lat, Long`
    Global,
    /// `UID, iso2, iso3, code3, FIPS, Admin2, Province_State, Country_Region, Lat, Long_, Combined_Key`
    Us,
}

impl IdentityShape {
    /// Number of leading identity columns
    pub fn width(&self) -> usize {
        match self {
            IdentityShape::Global => global_columns::DATE_COLUMN_START,
            IdentityShape::Us => us_columns::CONFIRMED_DATE_COLUMN_START,
        }
    }
}

/// Column layout for one time series file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLayout {
    /// First column holding a date (header) or a count (data rows)
    pub date_column_start: usize,

    /// Identity columns in front of the dates
    pub shape: IdentityShape,

    /// Population column, if the file carries one
    pub population_column: Option<usize>,
}

impl SeriesLayout {
    /// Layout for the global series (dates from column 4)
    pub fn global() -> Self {
        Self {
            date_column_start: global_columns::DATE_COLUMN_START,
            shape: IdentityShape::Global,
            population_column: None,
        }
    }

    /// Layout for the US confirmed series (dates from column 11)
    pub fn us_confirmed() -> Self {
        Self {
            date_column_start: us_columns::CONFIRMED_DATE_COLUMN_START,
            shape: IdentityShape::Us,
            population_column: None,
        }
    }

    /// Layout for the US deaths series (population at 11, dates from 12)
    pub fn us_deaths() -> Self {
        Self {
            date_column_start: us_columns::DEATHS_DATE_COLUMN_START,
            shape: IdentityShape::Us,
            population_column: Some(us_columns::POPULATION),
        }
    }

    /// Layout for a known series file
    pub fn for_kind(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::ConfirmedGlobal | SeriesKind::DeathsGlobal | SeriesKind::RecoveredGlobal => {
                Self::global()
            }
            SeriesKind::ConfirmedUs => Self::us_confirmed(),
            SeriesKind::DeathsUs => Self::us_deaths(),
        }
    }

    /// Derive a layout from the first date column
    ///
    /// Columns 4..=10 use the global identity, 11 the US identity and 12 or
    /// later the US identity with the population column at 11. Anything below
    /// 4 cannot hold the identity columns and is rejected.
    pub fn for_date_column_start(date_column_start: usize) -> Result<Self> {
        let shape = if date_column_start >= IdentityShape::Us.width() {
            IdentityShape::Us
        } else if date_column_start >= IdentityShape::Global.width() {
            IdentityShape::Global
        } else {
            return Err(Error::invalid_argument(
                "date_column_start",
                format!(
                    "Date columns must start at or after column {} (got {})",
                    IdentityShape::Global.width(),
                    date_column_start
                ),
            ));
        };

        let population_column = (shape == IdentityShape::Us
            && date_column_start > us_columns::POPULATION)
            .then_some(us_columns::POPULATION);

        Ok(Self {
            date_column_start,
            shape,
            population_column,
        })
    }

    /// Number of date columns in a row of `field_count` fields
    pub fn date_column_count(&self, field_count: usize) -> usize {
        field_count.saturating_sub(self.date_column_start)
    }
}

impl Default for SeriesLayout {
    fn default() -> Self {
        Self::global()
    }
}
