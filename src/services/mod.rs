// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod clock;
pub mod geo;
pub mod goal;
pub mod profile_session;
pub mod profiles;
pub mod ranking;
pub mod records;
pub mod session;
pub mod tracking;
pub mod voice;
pub mod weather;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use goal::GoalTracker;
pub use profile_session::{ProfileSession, SaveOutcome};
pub use profiles::ProfileService;
pub use ranking::{ProfileRecords, RankingEngine};
pub use records::{Comparison, RecordStore};
pub use session::{RunOutcome, RunSessionTracker, SessionSnapshot};
pub use tracking::{PositionSource, PositionWatch, WatchId};
pub use voice::{Announcer, VoiceSettings, VoiceSink};
pub use weather::{OpenMeteoClient, WeatherLookup, WeatherReport};
