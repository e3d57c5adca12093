// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile registration and deletion.

use crate::db::RunDb;
use crate::error::Result;
use crate::models::{NewProfile, Profile};
use validator::Validate;

/// Manages the shared profile list.
#[derive(Clone)]
pub struct ProfileService {
    db: RunDb,
}

impl ProfileService {
    pub fn new(db: RunDb) -> Self {
        Self { db }
    }

    /// All profiles in registration order.
    pub fn list(&self) -> Result<Vec<Profile>> {
        self.db.profiles()
    }

    pub fn get(&self, id: i64) -> Result<Option<Profile>> {
        Ok(self.db.profiles()?.into_iter().find(|p| p.id == id))
    }

    /// Register a new profile created at `now_millis`.
    ///
    /// The id is the creation time, bumped past any existing id.
    pub fn register(&self, input: NewProfile, now_millis: i64) -> Result<Profile> {
        input.validate()?;

        let mut profiles = self.db.profiles()?;
        let id = match profiles.iter().map(|p| p.id).max() {
            Some(max_id) if max_id >= now_millis => max_id + 1,
            _ => now_millis,
        };
        let profile = Profile {
            id,
            name: input.name,
            icon: input.icon,
        };
        profiles.push(profile.clone());
        self.db.save_profiles(&profiles)?;

        tracing::info!(profile_id = id, name = %profile.name, "Profile registered");
        Ok(profile)
    }

    /// Delete a profile with its records and goal.
    ///
    /// Returns `false` if no profile has this id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut profiles = self.db.profiles()?;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            tracing::debug!(profile_id = id, "Delete of unknown profile ignored");
            return Ok(false);
        }

        self.db.save_profiles(&profiles)?;
        self.db.delete_profile_data(id)?;
        tracing::info!(profile_id = id, "Profile deleted");
        Ok(true)
    }
}
