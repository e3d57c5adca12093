// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the key-value store.
//!
//! Provides high-level operations for:
//! - Profiles (shared ordered list)
//! - Records (one list per profile, most recent first)
//! - Goals (one state per profile)
//! - Voice settings

use crate::db::{keys, KvStore};
use crate::error::Result;
use crate::models::{GoalState, Profile, RunRecord};
use crate::services::voice::VoiceSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Typed store wrapper. Cheap to clone.
#[derive(Clone)]
pub struct RunDb {
    store: Arc<dyn KvStore>,
}

impl RunDb {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Create an in-memory database (tests, ephemeral hosts).
    pub fn new_in_memory() -> Self {
        Self::new(Arc::new(crate::db::MemoryStore::new()))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?)
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// All profiles in registration order.
    pub fn profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.load(keys::PROFILES)?.unwrap_or_default())
    }

    pub fn save_profiles(&self, profiles: &[Profile]) -> Result<()> {
        self.save(keys::PROFILES, profiles)
    }

    // ─── Record Operations ───────────────────────────────────────

    /// Records of a profile as stored (most recent first).
    pub fn records(&self, profile_id: i64) -> Result<Vec<RunRecord>> {
        Ok(self.load(&keys::records(profile_id))?.unwrap_or_default())
    }

    pub fn save_records(&self, profile_id: i64, records: &[RunRecord]) -> Result<()> {
        self.save(&keys::records(profile_id), records)
    }

    // ─── Goal Operations ─────────────────────────────────────────

    pub fn goal(&self, profile_id: i64) -> Result<Option<GoalState>> {
        self.load(&keys::goal(profile_id))
    }

    pub fn save_goal(&self, profile_id: i64, goal: &GoalState) -> Result<()> {
        self.save(&keys::goal(profile_id), goal)
    }

    // ─── Voice Settings ──────────────────────────────────────────

    pub fn voice_settings(&self) -> Result<VoiceSettings> {
        Ok(self.load(keys::VOICE_SETTINGS)?.unwrap_or_default())
    }

    pub fn save_voice_settings(&self, settings: &VoiceSettings) -> Result<()> {
        self.save(keys::VOICE_SETTINGS, settings)
    }

    // ─── Deletion ────────────────────────────────────────────────

    /// Remove everything owned by a profile (records and goal).
    ///
    /// The profile list itself is updated by the caller.
    pub fn delete_profile_data(&self, profile_id: i64) -> Result<()> {
        self.store.remove(&keys::records(profile_id))?;
        self.store.remove(&keys::goal(profile_id))?;
        tracing::debug!(profile_id, "Removed profile records and goal");
        Ok(())
    }
}
