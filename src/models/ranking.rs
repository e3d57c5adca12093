//! Cross-profile ranking types.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What profiles are ranked by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// Best (minimum) time, ascending
    #[default]
    Time,
    /// Total distance, descending
    Distance,
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RankingEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub profile_id: i64,
    pub name: String,
    /// Raw value: seconds for [`RankMode::Time`], km for [`RankMode::Distance`]
    pub value: f64,
    pub display_value: String,
}

/// Position of a profile within a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum RankPosition {
    /// 1-based
    Ranked(usize),
    Unranked,
}

impl RankPosition {
    pub fn position(&self) -> Option<usize> {
        match self {
            RankPosition::Ranked(n) => Some(*n),
            RankPosition::Unranked => None,
        }
    }
}

impl fmt::Display for RankPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankPosition::Ranked(n) => write!(f, "#{}", n),
            RankPosition::Unranked => f.write_str("--"),
        }
    }
}
