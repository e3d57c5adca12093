// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-profile record collection and the statistics derived from it.
//!
//! Records are kept most recent first. The personal-best flag is a derived
//! value: it is recomputed from scratch after every insert or delete (and
//! on load), so at most one record carries it and that record always has
//! the minimum elapsed time. On ties the earliest inserted record keeps it.

use crate::models::RunRecord;
use crate::time_utils::MonthKey;
use serde::Serialize;

/// How a new time compares with the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "snake_case")]
pub enum Comparison {
    Faster(f64),
    Slower(f64),
    Same,
}

impl Comparison {
    /// `delta` is previous minus candidate; positive means an improvement.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Comparison::Faster(delta)
        } else if delta < 0.0 {
            Comparison::Slower(-delta)
        } else {
            Comparison::Same
        }
    }

    pub fn message(&self) -> String {
        match self {
            Comparison::Faster(s) => format!("{:.2}s faster than last time!", s),
            Comparison::Slower(s) => format!("{:.2}s slower than last time", s),
            Comparison::Same => "Same time as last time".to_string(),
        }
    }
}

/// Ordered record collection of one profile.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<RunRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from storage (most recent first).
    ///
    /// Stored personal-best flags are discarded and recomputed.
    pub fn from_records(records: Vec<RunRecord>) -> Self {
        let mut store = Self { records };
        store.recompute_personal_best();
        store
    }

    /// Records in canonical order (most recent first).
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Id for a record created at `now_millis`, kept strictly above every existing id.
    pub fn next_id(&self, now_millis: i64) -> i64 {
        match self.records.iter().map(|r| r.id).max() {
            Some(max_id) if max_id >= now_millis => max_id + 1,
            _ => now_millis,
        }
    }

    /// Insert at the head and recompute the personal best.
    pub fn append(&mut self, record: RunRecord) {
        self.records.insert(0, record);
        self.recompute_personal_best();
    }

    /// Remove the record with `id`. Returns `false` (and changes nothing) if absent.
    pub fn delete(&mut self, id: i64) -> bool {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return false;
        };
        self.records.remove(pos);
        self.recompute_personal_best();
        true
    }

    fn recompute_personal_best(&mut self) {
        // Oldest first, strict comparison: the earliest of equal times wins
        let mut best: Option<(usize, f64)> = None;
        for (idx, record) in self.records.iter().enumerate().rev() {
            match best {
                Some((_, secs)) if record.elapsed_seconds >= secs => {}
                _ => best = Some((idx, record.elapsed_seconds)),
            }
        }
        let best_idx = best.map(|(idx, _)| idx);
        for (idx, record) in self.records.iter_mut().enumerate() {
            record.is_personal_best = Some(idx) == best_idx;
        }
    }

    pub fn personal_best(&self) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.is_personal_best)
    }

    /// Minimum elapsed time, `None` when there are no records.
    pub fn best_time(&self) -> Option<f64> {
        self.personal_best().map(|r| r.elapsed_seconds)
    }

    /// Mean elapsed time floored to whole seconds.
    pub fn average_time(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum = self
            .records
            .iter()
            .fold(0.0, |total, r| total + r.elapsed_seconds);
        Some((sum / self.records.len() as f64).floor())
    }

    /// Total distance (km), optionally limited to one calendar month.
    pub fn total_distance(&self, month: Option<MonthKey>) -> f64 {
        self.records
            .iter()
            .filter(|r| month.is_none_or(|m| m.contains(r.date)))
            .fold(0.0, |total, r| total + r.distance)
    }

    /// Previous (most recent) time minus `candidate_seconds`.
    ///
    /// Positive means the candidate is faster. `None` when there is no previous run.
    pub fn comparison_to_previous(&self, candidate_seconds: f64) -> Option<f64> {
        self.records
            .first()
            .map(|prev| prev.elapsed_seconds - candidate_seconds)
    }

    /// The last `n` runs, oldest first (chart order).
    pub fn recent(&self, n: usize) -> Vec<&RunRecord> {
        self.records.iter().take(n).rev().collect()
    }
}
