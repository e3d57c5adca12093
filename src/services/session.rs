// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run session tracking.
//!
//! A `RunSessionTracker` owns the ephemeral state of one run being timed:
//! - a pausable stopwatch anchored on the clock's monotonic instant
//! - live distance accumulated from accepted position fixes
//! - the recorded path
//! - the last whole kilometer that was announced
//!
//! Timer ticks and position fixes are independent event sources; both call
//! into the tracker sequentially and each call runs to completion.

use crate::models::{CoreEvent, GeoPoint, PositionSample};
use crate::services::clock::SharedClock;
use crate::services::geo::haversine_km;
use crate::time_utils::format_clock;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Immutable result of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub elapsed_seconds: f64,
    /// Live GPS distance (km); zero when no fixes were accepted
    pub distance: f64,
    pub path: Vec<GeoPoint>,
}

/// Read-only view of the session for live display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub running: bool,
    pub elapsed_seconds: f64,
    pub elapsed_display: String,
    pub live_distance: f64,
    pub path_points: usize,
    pub last_announced_km: u32,
}

/// Stopwatch plus live distance accumulator.
pub struct RunSessionTracker {
    clock: SharedClock,
    accuracy_limit: f64,
    /// Instant the current running stretch began; `Some` while running
    resumed_at: Option<Instant>,
    /// Time banked from completed running stretches
    accumulated: Duration,
    live_distance: f64,
    path: Vec<GeoPoint>,
    last_announced_km: u32,
}

impl RunSessionTracker {
    /// `accuracy_limit` is the largest accepted accuracy radius for a fix.
    pub fn new(clock: SharedClock, accuracy_limit: f64) -> Self {
        Self {
            clock,
            accuracy_limit,
            resumed_at: None,
            accumulated: Duration::ZERO,
            live_distance: 0.0,
            path: Vec::new(),
            last_announced_km: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Begin or resume timing. No-op while already running.
    pub fn start(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(self.clock.now());
            tracing::debug!(
                banked_secs = self.accumulated.as_secs_f64(),
                "Session timer started"
            );
        }
    }

    /// Current elapsed time in seconds.
    pub fn sample(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    fn elapsed(&self) -> Duration {
        match self.resumed_at {
            Some(since) => self.accumulated + self.clock.now().saturating_duration_since(since),
            None => self.accumulated,
        }
    }

    /// Freeze elapsed-time accrual. No-op while paused.
    pub fn pause(&mut self) {
        if self.resumed_at.is_some() {
            self.accumulated = self.elapsed();
            self.resumed_at = None;
            tracing::debug!(elapsed_secs = self.sample(), "Session timer paused");
        }
    }

    /// Stop timing and clear elapsed time, live distance and path.
    pub fn reset(&mut self) {
        self.resumed_at = None;
        self.accumulated = Duration::ZERO;
        self.live_distance = 0.0;
        self.path.clear();
        self.last_announced_km = 0;
    }

    /// Stop timing and hand out the session result, leaving the tracker reset.
    pub fn finalize(&mut self) -> RunOutcome {
        self.pause();
        let outcome = RunOutcome {
            elapsed_seconds: self.sample(),
            distance: self.live_distance,
            path: std::mem::take(&mut self.path),
        };
        self.reset();
        tracing::debug!(
            elapsed_secs = outcome.elapsed_seconds,
            distance_km = outcome.distance,
            points = outcome.path.len(),
            "Session finalized"
        );
        outcome
    }

    /// Feed one position fix.
    ///
    /// Fixes arriving while paused and fixes with an accuracy radius above
    /// the limit are dropped. Returns a milestone event when the live
    /// distance crossed into a new whole kilometer.
    pub fn record_position(&mut self, sample: PositionSample) -> Option<CoreEvent> {
        if !self.is_running() {
            return None;
        }
        if sample.accuracy.is_nan() || sample.accuracy > self.accuracy_limit {
            tracing::debug!(accuracy = sample.accuracy, "Discarding noisy position fix");
            return None;
        }

        if let Some(last) = self.path.last() {
            self.live_distance += haversine_km(*last, sample.point);
        }
        self.path.push(sample.point);

        self.check_milestone()
    }

    fn check_milestone(&mut self) -> Option<CoreEvent> {
        let whole_km = self.live_distance.floor() as u32;
        if whole_km <= self.last_announced_km {
            return None;
        }
        self.last_announced_km = whole_km;
        let elapsed_display = format_clock(self.sample());
        tracing::info!(km = whole_km, elapsed = %elapsed_display, "Distance milestone");
        Some(CoreEvent::DistanceMilestoneReached {
            km: whole_km,
            elapsed_display,
        })
    }

    pub fn live_distance(&self) -> f64 {
        self.live_distance
    }

    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let elapsed_seconds = self.sample();
        SessionSnapshot {
            running: self.is_running(),
            elapsed_seconds,
            elapsed_display: format_clock(elapsed_seconds),
            live_distance: self.live_distance,
            path_points: self.path.len(),
            last_announced_km: self.last_announced_km,
        }
    }
}
