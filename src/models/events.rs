//! Events the core emits for the UI to react to.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum CoreEvent {
    /// Live distance crossed a new whole-km boundary.
    DistanceMilestoneReached { km: u32, elapsed_display: String },
    /// The monthly goal was reached for the first time this month.
    GoalAchieved {
        target_distance: f64,
        actual_distance: f64,
    },
}
