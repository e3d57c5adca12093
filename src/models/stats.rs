//! Per-profile statistics for the home dashboard.
//!
//! Always derived from the full record list; nothing here is stored.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::RankPosition;
use crate::services::records::RecordStore;
use crate::time_utils::MonthKey;

/// Number of runs shown in the recent-times chart.
pub const CHART_RUNS: usize = 7;

/// Summary statistics for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub run_count: usize,
    /// Total distance across all runs (km)
    pub total_distance: f64,
    /// Mean elapsed time, floored to whole seconds
    pub average_seconds: Option<f64>,
    pub best_seconds: Option<f64>,
    /// Position in the best-time ranking
    pub time_rank: RankPosition,
    /// Distance per month ("YYYY-MM" format)
    pub distance_by_month: BTreeMap<String, f64>,
    /// Elapsed times of the latest runs, oldest first
    pub recent_seconds: Vec<f64>,
}

impl ProfileStats {
    pub fn from_store(store: &RecordStore, time_rank: RankPosition) -> Self {
        let mut distance_by_month = BTreeMap::new();
        for record in store.records() {
            *distance_by_month
                .entry(MonthKey::of(record.date).to_string())
                .or_insert(0.0) += record.distance;
        }

        Self {
            run_count: store.len(),
            total_distance: store.total_distance(None),
            average_seconds: store.average_time(),
            best_seconds: store.best_time(),
            time_rank,
            distance_by_month,
            recent_seconds: store
                .recent(CHART_RUNS)
                .iter()
                .map(|r| r.elapsed_seconds)
                .collect(),
        }
    }
}
