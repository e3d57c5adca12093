// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod events;
pub mod goal;
pub mod profile;
pub mod ranking;
pub mod run;
pub mod stats;

pub use events::CoreEvent;
pub use goal::{GoalProgress, GoalState};
pub use profile::{NewProfile, Profile, ProfileIcon};
pub use ranking::{RankMode, RankPosition, RankingEntry};
pub use run::{GeoPoint, NewRun, PositionSample, RunRecord, Weather};
pub use stats::ProfileStats;
