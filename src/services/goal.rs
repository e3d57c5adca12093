// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly distance goal tracking.
//!
//! The stored month token is compared against the current month on every
//! read. On mismatch the celebration flag is cleared and the new month is
//! persisted; the target carries over.

use crate::config::DEFAULT_GOAL_KM;
use crate::db::RunDb;
use crate::error::{AppError, Result};
use crate::models::{CoreEvent, GoalProgress, GoalState};
use crate::services::records::RecordStore;
use crate::time_utils::MonthKey;
use chrono::NaiveDate;
use validator::Validate;

#[derive(Validate)]
struct TargetInput {
    #[validate(range(exclusive_min = 0.0, message = "goal must be a positive distance"))]
    target: f64,
}

/// Goal state of one profile, bound to its storage slot.
pub struct GoalTracker {
    db: RunDb,
    profile_id: i64,
    state: GoalState,
}

impl GoalTracker {
    /// Load the goal of a profile, creating it with `default_target` if absent.
    ///
    /// A stored target that is not a positive distance is replaced by the
    /// default. Applies the month rollover immediately.
    pub fn load(db: RunDb, profile_id: i64, today: NaiveDate, default_target: f64) -> Result<Self> {
        let default_target = if is_valid_target(default_target) {
            default_target
        } else {
            tracing::warn!(default_target, "Unusable default goal; using {}", DEFAULT_GOAL_KM);
            DEFAULT_GOAL_KM
        };

        let month = MonthKey::of(today);
        let state = match db.goal(profile_id)? {
            Some(state) if is_valid_target(state.target) => state,
            Some(state) => {
                tracing::warn!(profile_id, target = state.target, "Stored goal target reset to default");
                let state = GoalState {
                    target: default_target,
                    ..state
                };
                db.save_goal(profile_id, &state)?;
                state
            }
            None => {
                let state = GoalState::new(default_target, month);
                db.save_goal(profile_id, &state)?;
                state
            }
        };
        let mut tracker = Self {
            db,
            profile_id,
            state,
        };
        tracker.refresh(today)?;
        Ok(tracker)
    }

    /// Goal state as of the last read (call a reading method first for a fresh view).
    pub fn state(&self) -> &GoalState {
        &self.state
    }

    pub fn target(&self) -> f64 {
        self.state.target
    }

    /// Reset the celebration flag if `today` is in a new month. Returns whether it rolled over.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<bool> {
        let month = MonthKey::of(today);
        if self.state.month == month {
            return Ok(false);
        }
        let from = self.state.month;
        self.commit(GoalState {
            month,
            achieved: false,
            ..self.state.clone()
        })?;
        tracing::info!(
            profile_id = self.profile_id,
            %from,
            to = %month,
            "Goal month rolled over"
        );
        Ok(true)
    }

    /// Persist `next`, then make it current. On a failed write nothing changes.
    fn commit(&mut self, next: GoalState) -> Result<()> {
        self.db.save_goal(self.profile_id, &next)?;
        self.state = next;
        Ok(())
    }

    /// Change the monthly target. Zero, negative and non-finite targets are rejected.
    ///
    /// The celebration flag is left alone: raising the target after reaching
    /// it does not celebrate again this month.
    pub fn set_target(&mut self, target: f64, today: NaiveDate) -> Result<()> {
        if !target.is_finite() {
            return Err(AppError::Validation("target: goal must be a number".into()));
        }
        TargetInput { target }.validate()?;

        self.refresh(today)?;
        self.commit(GoalState {
            target,
            ..self.state.clone()
        })?;
        tracing::info!(profile_id = self.profile_id, target, "Goal target updated");
        Ok(())
    }

    /// Distance run in the month containing `today` (km).
    pub fn current_month_distance(records: &RecordStore, today: NaiveDate) -> f64 {
        records.total_distance(Some(MonthKey::of(today)))
    }

    pub fn progress(&mut self, records: &RecordStore, today: NaiveDate) -> Result<GoalProgress> {
        self.refresh(today)?;
        let current = Self::current_month_distance(records, today);
        Ok(GoalProgress {
            target: self.state.target,
            current,
            percent: progress_percent(current, self.state.target),
            reached: current >= self.state.target,
        })
    }

    /// Mark the goal achieved the first time this month's distance reaches it.
    ///
    /// Returns the celebration event at most once per month.
    pub fn check_and_mark_achievement(
        &mut self,
        records: &RecordStore,
        today: NaiveDate,
    ) -> Result<Option<CoreEvent>> {
        self.refresh(today)?;
        if self.state.achieved {
            return Ok(None);
        }
        let current = Self::current_month_distance(records, today);
        if current < self.state.target {
            return Ok(None);
        }

        self.commit(GoalState {
            achieved: true,
            ..self.state.clone()
        })?;
        tracing::info!(
            profile_id = self.profile_id,
            target = self.state.target,
            actual = current,
            "Monthly goal achieved"
        );
        Ok(Some(CoreEvent::GoalAchieved {
            target_distance: self.state.target,
            actual_distance: current,
        }))
    }
}

fn is_valid_target(target: f64) -> bool {
    target.is_finite() && target > 0.0
}

/// `100 * current / target`, capped at 100.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (100.0 * current / target).min(100.0)
}
