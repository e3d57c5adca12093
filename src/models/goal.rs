//! Monthly distance goal model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::MonthKey;

/// Per-profile goal state.
///
/// Stored at: `goal_{profile_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalState {
    /// Target distance for the month (km, always > 0)
    pub target: f64,
    /// Month the `achieved` flag refers to
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub month: MonthKey,
    #[serde(default)]
    pub achieved: bool,
}

impl GoalState {
    pub fn new(target: f64, month: MonthKey) -> Self {
        Self {
            target,
            month,
            achieved: false,
        }
    }
}

/// Progress snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgress {
    pub target: f64,
    pub current: f64,
    /// Capped at 100
    pub percent: f64,
    /// Current distance has reached the target (independent of the celebration flag)
    pub reached: bool,
}
