// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Runlog: a personal running-log core.
//!
//! This crate tracks runs in progress (timer, live GPS distance, distance
//! milestones), stores finished runs per local profile, and derives personal
//! bests, rankings and monthly goal progress from the stored history. UI,
//! speech output and the position stream are supplied by the host.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RunDb;
use error::{AppError, Result};
use models::{
    CoreEvent, NewProfile, NewRun, PositionSample, Profile, ProfileIcon, ProfileStats, RankMode,
    RankPosition, RankingEntry,
};
use services::{
    Announcer, PositionWatch, ProfileService, ProfileSession, RankingEngine, RunOutcome,
    RunSessionTracker, SaveOutcome, SessionSnapshot, SharedClock, VoiceSettings, VoiceSink,
};

/// Explicit application context.
///
/// Holds the selected profile and the run being timed. Every operation the
/// UI performs goes through this value; there is no global state.
pub struct RunContext {
    pub config: Config,
    db: RunDb,
    clock: SharedClock,
    profiles: ProfileService,
    active: Option<ProfileSession>,
    tracker: RunSessionTracker,
    position: PositionWatch,
    announcer: Announcer,
}

impl RunContext {
    pub fn new(
        config: Config,
        db: RunDb,
        clock: SharedClock,
        position: PositionWatch,
        voice: Option<Box<dyn VoiceSink>>,
    ) -> Result<Self> {
        let mut voice_settings = db.voice_settings()?;
        voice_settings.enabled &= config.voice_enabled;

        Ok(Self {
            tracker: RunSessionTracker::new(clock.clone(), config.gps_accuracy_limit),
            profiles: ProfileService::new(db.clone()),
            announcer: Announcer::new(voice, voice_settings),
            active: None,
            position,
            config,
            db,
            clock,
        })
    }

    // ─── Profiles ────────────────────────────────────────────────

    pub fn profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.list()
    }

    /// Register a profile and select it.
    pub fn register_profile(&mut self, name: &str, icon: ProfileIcon) -> Result<Profile> {
        let profile = self
            .profiles
            .register(NewProfile::new(name, icon), self.clock.epoch_millis())?;
        self.select_profile(profile.id)?;
        Ok(profile)
    }

    /// Switch to another profile. Any run in progress is discarded.
    pub fn select_profile(&mut self, id: i64) -> Result<()> {
        let profile = self
            .profiles
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;
        self.discard_run();
        let session = ProfileSession::open(
            self.db.clone(),
            self.clock.clone(),
            profile,
            &self.config,
        )?;
        self.active = Some(session);
        Ok(())
    }

    /// Delete a profile with all its data. Returns `false` for an unknown id.
    pub fn delete_profile(&mut self, id: i64) -> Result<bool> {
        let deleted = self.profiles.delete(id)?;
        if deleted && self.active.as_ref().is_some_and(|s| s.profile().id == id) {
            self.discard_run();
            self.active = None;
        }
        Ok(deleted)
    }

    pub fn active_profile(&self) -> Option<&ProfileSession> {
        self.active.as_ref()
    }

    pub fn active_profile_mut(&mut self) -> Result<&mut ProfileSession> {
        self.active
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No profile selected".to_string()))
    }

    // ─── Run Session ─────────────────────────────────────────────

    /// Begin or resume the run timer and live tracking.
    pub fn start_run(&mut self) {
        if self.tracker.is_running() {
            return;
        }
        self.tracker.start();
        if self.config.gps_enabled {
            self.position.start();
        }
        self.announcer.announce_start();
    }

    /// Pause the run timer and live tracking.
    pub fn pause_run(&mut self) {
        if !self.tracker.is_running() {
            return;
        }
        self.tracker.pause();
        self.position.stop();
        self.announcer.announce_stop();
    }

    /// Start when paused, pause when running.
    pub fn toggle_run(&mut self) {
        if self.tracker.is_running() {
            self.pause_run();
        } else {
            self.start_run();
        }
    }

    /// Throw away the run in progress.
    pub fn discard_run(&mut self) {
        self.position.stop();
        self.tracker.reset();
    }

    /// Stop the run and hand out its result for the save form.
    pub fn finish_run(&mut self) -> RunOutcome {
        self.position.stop();
        self.tracker.finalize()
    }

    /// Position fix callback. Milestones are announced and returned.
    pub fn on_position(&mut self, sample: PositionSample) -> Option<CoreEvent> {
        let event = self.tracker.record_position(sample)?;
        self.announcer.announce(&event);
        Some(event)
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        self.tracker.snapshot()
    }

    pub fn is_tracking_position(&self) -> bool {
        self.position.is_tracking()
    }

    // ─── Records & Goals ─────────────────────────────────────────

    pub fn save_run(&mut self, run: NewRun) -> Result<SaveOutcome> {
        self.active_profile_mut()?.save_run(run)
    }

    pub fn delete_run(&mut self, id: i64) -> Result<bool> {
        self.active_profile_mut()?.delete_run(id)
    }

    pub fn set_goal_target(&mut self, target: f64) -> Result<()> {
        self.active_profile_mut()?.set_goal_target(target)
    }

    // ─── Rankings & Stats ────────────────────────────────────────

    pub fn ranking(&self, mode: RankMode) -> Result<Vec<RankingEntry>> {
        Ok(RankingEngine::load(&self.db)?.rank(mode))
    }

    pub fn rank_of(&self, profile_id: i64, mode: RankMode) -> Result<RankPosition> {
        Ok(RankingEngine::load(&self.db)?.rank_of(profile_id, mode))
    }

    pub fn team_total_distance(&self) -> Result<f64> {
        Ok(RankingEngine::load(&self.db)?.team_total_distance())
    }

    /// Dashboard statistics of the selected profile.
    pub fn stats(&self) -> Result<ProfileStats> {
        let session = self
            .active
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No profile selected".to_string()))?;
        let rank = self.rank_of(session.profile().id, RankMode::Time)?;
        Ok(ProfileStats::from_store(session.records(), rank))
    }

    // ─── Voice ───────────────────────────────────────────────────

    pub fn voice_settings(&self) -> &VoiceSettings {
        self.announcer.settings()
    }

    /// Store the user's voice preference. `RUNLOG_VOICE_ENABLED=false` still mutes output.
    pub fn set_voice_settings(&mut self, settings: VoiceSettings) -> Result<()> {
        let mut settings = settings.clamped();
        self.db.save_voice_settings(&settings)?;
        settings.enabled &= self.config.voice_enabled;
        self.announcer.set_settings(settings);
        Ok(())
    }
}
