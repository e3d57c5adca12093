// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! State of the selected profile: its records and its goal.
//!
//! Every mutation is persisted before the in-memory copy is replaced, so a
//! storage failure leaves the session unchanged.

use crate::config::Config;
use crate::db::RunDb;
use crate::error::{AppError, Result};
use crate::models::{CoreEvent, GoalProgress, NewRun, Profile, RunRecord};
use crate::services::clock::SharedClock;
use crate::services::goal::GoalTracker;
use crate::services::records::{Comparison, RecordStore};
use crate::time_utils::format_pace;
use validator::Validate;

/// Result of saving a run.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// The stored record, with its personal-best flag as of this save
    pub record: RunRecord,
    /// `None` for the first run of a profile
    pub comparison: Option<Comparison>,
    pub goal_event: Option<CoreEvent>,
}

/// The selected profile with its records and goal.
pub struct ProfileSession {
    db: RunDb,
    clock: SharedClock,
    profile: Profile,
    records: RecordStore,
    goal: GoalTracker,
}

impl ProfileSession {
    /// Load a profile's records and goal. The goal month rollover happens here.
    pub fn open(db: RunDb, clock: SharedClock, profile: Profile, config: &Config) -> Result<Self> {
        let records = RecordStore::from_records(db.records(profile.id)?);
        let goal = GoalTracker::load(
            db.clone(),
            profile.id,
            clock.today(),
            config.default_goal_km,
        )?;
        tracing::info!(
            profile_id = profile.id,
            runs = records.len(),
            "Profile session opened"
        );
        Ok(Self {
            db,
            clock,
            profile,
            records,
            goal,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn goal(&self) -> &GoalTracker {
        &self.goal
    }

    /// Validate, store and evaluate a finished run.
    pub fn save_run(&mut self, run: NewRun) -> Result<SaveOutcome> {
        if !run.elapsed_seconds.is_finite() || !run.distance.is_finite() {
            return Err(AppError::Validation(
                "time and distance must be numbers".to_string(),
            ));
        }
        run.validate()?;

        let comparison = self
            .records
            .comparison_to_previous(run.elapsed_seconds)
            .map(Comparison::from_delta);

        let id = self.records.next_id(self.clock.epoch_millis());
        let record = RunRecord {
            id,
            date: self.clock.today(),
            elapsed_seconds: run.elapsed_seconds,
            distance: run.distance,
            pace: format_pace(run.elapsed_seconds, run.distance),
            weather: run.weather,
            temperature: run.temperature,
            is_personal_best: false,
            path: (!run.path.is_empty()).then_some(run.path),
        };

        let mut updated = self.records.clone();
        updated.append(record);
        self.db.save_records(self.profile.id, updated.records())?;
        self.records = updated;

        let stored = self
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("record {} vanished after save", id)))?;
        tracing::info!(
            profile_id = self.profile.id,
            record_id = id,
            seconds = stored.elapsed_seconds,
            distance_km = stored.distance,
            personal_best = stored.is_personal_best,
            "Run saved"
        );

        // The run is stored; a failed goal write leaves the goal for the next check
        let goal_event = self.check_goal().unwrap_or_else(|e| {
            tracing::warn!(profile_id = self.profile.id, error = %e, "Goal check failed after save");
            None
        });

        Ok(SaveOutcome {
            record: stored,
            comparison,
            goal_event,
        })
    }

    /// Delete a run. Unknown ids are ignored and return `false`.
    pub fn delete_run(&mut self, id: i64) -> Result<bool> {
        let mut updated = self.records.clone();
        if !updated.delete(id) {
            tracing::debug!(profile_id = self.profile.id, record_id = id, "Delete of unknown run ignored");
            return Ok(false);
        }
        self.db.save_records(self.profile.id, updated.records())?;
        self.records = updated;
        tracing::info!(profile_id = self.profile.id, record_id = id, "Run deleted");
        Ok(true)
    }

    pub fn set_goal_target(&mut self, target: f64) -> Result<()> {
        self.goal.set_target(target, self.clock.today())
    }

    pub fn goal_progress(&mut self) -> Result<GoalProgress> {
        self.goal.progress(&self.records, self.clock.today())
    }

    /// Fires the goal celebration at most once per month.
    pub fn check_goal(&mut self) -> Result<Option<CoreEvent>> {
        self.goal
            .check_and_mark_achievement(&self.records, self.clock.today())
    }

    /// Distance run this calendar month (km).
    pub fn current_month_distance(&self) -> f64 {
        GoalTracker::current_month_distance(&self.records, self.clock.today())
    }
}
