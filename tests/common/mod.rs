// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{NaiveDate, NaiveDateTime};
use runlog_tracker::config::Config;
use runlog_tracker::db::RunDb;
use runlog_tracker::error::{AppError, Result};
use runlog_tracker::models::{PositionSample, RunRecord, Weather};
use runlog_tracker::services::{
    ManualClock, PositionSource, PositionWatch, VoiceSettings, VoiceSink, WatchId,
};
use runlog_tracker::RunContext;
use std::cell::RefCell;
use std::rc::Rc;

/// Kilometers per degree of latitude on the haversine sphere.
#[allow(dead_code)]
pub const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

/// A fix `km` north of the equator on the prime meridian.
#[allow(dead_code)]
pub fn fix_at_km(km: f64) -> PositionSample {
    PositionSample::new(km / KM_PER_DEGREE, 0.0, 5.0)
}

#[allow(dead_code)]
pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("bad test timestamp")
}

#[allow(dead_code)]
pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

/// Build a record for store-level tests.
#[allow(dead_code)]
pub fn make_record(id: i64, date: &str, seconds: f64, distance: f64) -> RunRecord {
    RunRecord {
        id,
        date: day(date),
        elapsed_seconds: seconds,
        distance,
        pace: String::new(),
        weather: Weather::Sunny,
        temperature: None,
        is_personal_best: false,
        path: None,
    }
}

/// Shared view of what the fake GPS was asked to do.
#[derive(Default)]
pub struct GpsLog {
    pub subscribes: u32,
    pub unsubscribes: u32,
}

impl GpsLog {
    #[allow(dead_code)]
    pub fn active(&self) -> bool {
        self.subscribes > self.unsubscribes
    }
}

pub struct FakeGps {
    log: Rc<RefCell<GpsLog>>,
    available: bool,
}

impl PositionSource for FakeGps {
    fn subscribe(&mut self) -> Result<WatchId> {
        if !self.available {
            return Err(AppError::SensorUnavailable("location permission denied".into()));
        }
        let mut log = self.log.borrow_mut();
        log.subscribes += 1;
        Ok(WatchId(log.subscribes as u64))
    }

    fn unsubscribe(&mut self, _id: WatchId) {
        self.log.borrow_mut().unsubscribes += 1;
    }
}

pub struct RecordingVoice(pub Rc<RefCell<Vec<String>>>);

impl VoiceSink for RecordingVoice {
    fn speak(&mut self, text: &str, _settings: &VoiceSettings) {
        self.0.borrow_mut().push(text.to_string());
    }
}

/// Everything a context test needs to observe.
#[allow(dead_code)]
pub struct Harness {
    pub ctx: RunContext,
    pub clock: Rc<ManualClock>,
    pub db: RunDb,
    pub gps: Rc<RefCell<GpsLog>>,
    pub spoken: Rc<RefCell<Vec<String>>>,
}

/// Create a context over an in-memory store with a fake GPS and voice.
#[allow(dead_code)]
pub fn harness(start: &str) -> Harness {
    harness_with(start, true)
}

#[allow(dead_code)]
pub fn harness_with(start: &str, gps_available: bool) -> Harness {
    let clock = ManualClock::new(at(start));
    let db = RunDb::new_in_memory();
    let gps = Rc::new(RefCell::new(GpsLog::default()));
    let spoken = Rc::new(RefCell::new(Vec::new()));

    let position = PositionWatch::new(Some(Box::new(FakeGps {
        log: gps.clone(),
        available: gps_available,
    })));
    let ctx = RunContext::new(
        Config::default(),
        db.clone(),
        clock.clone(),
        position,
        Some(Box::new(RecordingVoice(spoken.clone()))),
    )
    .expect("Failed to build context");

    Harness {
        ctx,
        clock,
        db,
        gps,
        spoken,
    }
}
