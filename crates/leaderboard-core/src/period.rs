//! Snapshot period keys.
//!
//! Every snapshot on disk is named after one of these keys, e.g.
//! `public/leaderboard/2week.json`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// The fixed set of periods a snapshot can cover.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Period {
    #[serde(rename = "week")]
    #[value(name = "week")]
    Week,
    #[serde(rename = "2week")]
    #[value(name = "2week")]
    TwoWeeks,
    #[serde(rename = "3week")]
    #[value(name = "3week")]
    ThreeWeeks,
    #[serde(rename = "month")]
    #[value(name = "month")]
    Month,
    #[serde(rename = "2month")]
    #[value(name = "2month")]
    TwoMonths,
    /// The canonical snapshot most read operations default to.
    #[default]
    #[serde(rename = "year")]
    #[value(name = "year")]
    Year,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Week,
        Period::TwoWeeks,
        Period::ThreeWeeks,
        Period::Month,
        Period::TwoMonths,
        Period::Year,
    ];

    /// The key used in snapshot file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::TwoWeeks => "2week",
            Period::ThreeWeeks => "3week",
            Period::Month => "month",
            Period::TwoMonths => "2month",
            Period::Year => "year",
        }
    }

    /// File name of the snapshot for this period.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Heading shown above a leaderboard for this period.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Weekly",
            Period::TwoWeeks => "Two-Week",
            Period::ThreeWeeks => "Three-Week",
            Period::Month => "Monthly",
            Period::TwoMonths => "Two-Month",
            Period::Year => "Yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| LeaderboardError::InvalidPeriod(s.to_string()))
    }
}
