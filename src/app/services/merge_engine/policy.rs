//! Aggregation policy for countries reported as several series rows

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the rows matching one country are combined
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Add cumulative counts and deltas of every matching row, position by position
    #[default]
    Sum,

    /// Keep only the last matching row in series order
    ///
    /// Countries split into provinces (China, Canada, ...) end up with the
    /// numbers of a single province. Kept to reproduce historical reports.
    LastMatch,
}

impl MergePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::LastMatch => "last-match",
        }
    }
}

impl FromStr for MergePolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "last-match" | "last_match" | "lastmatch" => Ok(Self::LastMatch),
            other => Err(crate::Error::invalid_argument(
                "merge_policy",
                format!("unknown merge policy '{}', expected 'sum' or 'last-match'", other),
            )),
        }
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
