// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end flows through the application context.

use runlog_tracker::config::Config;
use runlog_tracker::db::{KvStore, MemoryStore, RunDb};
use runlog_tracker::error::{AppError, Result};
use runlog_tracker::models::{CoreEvent, NewRun, ProfileIcon, RankMode, RankPosition, Weather};
use runlog_tracker::services::{Comparison, ManualClock, PositionWatch, VoiceSettings};
use runlog_tracker::RunContext;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod common;
use common::{at, day, fix_at_km, harness, harness_with, RecordingVoice};

#[test]
fn test_full_run_flow() {
    let mut h = harness("2024-05-10 07:00:00");
    let profile = h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();
    h.ctx.set_goal_target(1.0).unwrap();

    h.ctx.start_run();
    assert!(h.ctx.is_tracking_position());
    assert!(h.gps.borrow().active());

    assert_eq!(h.ctx.on_position(fix_at_km(0.0)), None);
    h.clock.advance_secs(300.0);
    let event = h.ctx.on_position(fix_at_km(1.05));
    assert!(matches!(
        event,
        Some(CoreEvent::DistanceMilestoneReached { km: 1, .. })
    ));

    let outcome = h.ctx.finish_run();
    assert!(!h.gps.borrow().active(), "finishing must release the GPS");
    assert_eq!(outcome.elapsed_seconds, 300.0);
    assert!((outcome.distance - 1.05).abs() < 1e-9);

    assert_eq!(
        *h.spoken.borrow(),
        vec![
            "Start".to_string(),
            "1 km passed. Current time 05:00.00.".to_string()
        ]
    );

    let saved = h
        .ctx
        .save_run(
            NewRun::new(outcome.elapsed_seconds, outcome.distance)
                .with_weather(Weather::Cloudy, Some(18.5))
                .with_path(outcome.path),
        )
        .unwrap();

    assert!(saved.record.is_personal_best);
    assert_eq!(saved.record.date, day("2024-05-10"));
    assert_eq!(saved.record.pace, "4'45\"");
    assert_eq!(saved.record.path.as_ref().map(Vec::len), Some(2));
    assert_eq!(saved.comparison, None);
    assert!(matches!(
        saved.goal_event,
        Some(CoreEvent::GoalAchieved { target_distance, .. }) if target_distance == 1.0
    ));

    let stored = h.db.records(profile.id).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].weather, Weather::Cloudy);

    let stats = h.ctx.stats().unwrap();
    assert_eq!(stats.run_count, 1);
    assert_eq!(stats.time_rank, RankPosition::Ranked(1));
}

#[test]
fn test_second_run_compares_and_keeps_goal_quiet() {
    let mut h = harness("2024-05-10 07:00:00");
    h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();
    h.ctx.set_goal_target(5.0).unwrap();

    let first = h.ctx.save_run(NewRun::new(1500.0, 5.0)).unwrap();
    assert!(first.goal_event.is_some());

    h.clock.advance_secs(86_400.0);
    let second = h.ctx.save_run(NewRun::new(1450.25, 5.0)).unwrap();
    assert_eq!(second.comparison, Some(Comparison::Faster(49.75)));
    assert_eq!(second.goal_event, None);
    assert!(second.record.is_personal_best);
    assert_ne!(first.record.id, second.record.id);

    let session = h.ctx.active_profile().unwrap();
    let best: Vec<i64> = session
        .records()
        .records()
        .iter()
        .filter(|r| r.is_personal_best)
        .map(|r| r.id)
        .collect();
    assert_eq!(best, vec![second.record.id]);
}

#[test]
fn test_switching_profile_stops_tracking() {
    let mut h = harness("2024-05-10 07:00:00");
    let a = h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    h.ctx.start_run();
    h.ctx.on_position(fix_at_km(0.0));
    h.ctx.on_position(fix_at_km(0.4));
    assert!(h.gps.borrow().active());

    let b = h.ctx.register_profile("Ben", ProfileIcon::default()).unwrap();
    assert_ne!(a.id, b.id);
    assert!(!h.gps.borrow().active());
    assert!(!h.ctx.is_tracking_position());

    let snapshot = h.ctx.session_snapshot();
    assert!(!snapshot.running);
    assert_eq!(snapshot.live_distance, 0.0);
    assert_eq!(h.ctx.active_profile().unwrap().profile().id, b.id);
}

#[test]
fn test_pause_releases_gps_and_toggle_resumes() {
    let mut h = harness("2024-05-10 07:00:00");
    h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    h.ctx.toggle_run();
    assert!(h.gps.borrow().active());
    h.ctx.toggle_run();
    assert!(!h.gps.borrow().active());
    h.ctx.toggle_run();
    assert!(h.gps.borrow().active());
    assert_eq!(h.gps.borrow().subscribes, 2);

    assert_eq!(
        *h.spoken.borrow(),
        vec!["Start".to_string(), "Stop".to_string(), "Start".to_string()]
    );
}

#[test]
fn test_delete_profile_cascades() {
    let mut h = harness("2024-05-10 07:00:00");
    let keep = h.ctx.register_profile("Keep", ProfileIcon::default()).unwrap();
    h.ctx.save_run(NewRun::new(1800.0, 6.0)).unwrap();

    let gone = h
        .ctx
        .register_profile("Gone", ProfileIcon::Emoji("🐢".into()))
        .unwrap();
    h.ctx.save_run(NewRun::new(1900.0, 6.0)).unwrap();
    h.ctx.start_run();

    assert!(h.ctx.delete_profile(gone.id).unwrap());
    assert!(h.ctx.active_profile().is_none());
    assert!(!h.gps.borrow().active());
    assert!(h.db.records(gone.id).unwrap().is_empty());
    assert_eq!(h.db.goal(gone.id).unwrap(), None);

    // Other profiles are untouched
    assert_eq!(h.db.records(keep.id).unwrap().len(), 1);
    let ranking = h.ctx.ranking(RankMode::Time).unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].profile_id, keep.id);

    assert!(!h.ctx.delete_profile(gone.id).unwrap());
    assert!(matches!(
        h.ctx.save_run(NewRun::new(100.0, 1.0)),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_select_unknown_profile() {
    let mut h = harness("2024-05-10 07:00:00");
    assert!(matches!(
        h.ctx.select_profile(42),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(h.ctx.stats(), Err(AppError::NotFound(_))));
}

#[test]
fn test_gps_unavailable_degrades_to_timer_only() {
    let mut h = harness_with("2024-05-10 07:00:00", false);
    h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    h.ctx.start_run();
    assert!(!h.ctx.is_tracking_position());
    assert_eq!(h.gps.borrow().subscribes, 0);

    h.clock.advance_secs(90.0);
    let snapshot = h.ctx.session_snapshot();
    assert!(snapshot.running);
    assert_eq!(snapshot.elapsed_display, "01:30.00");

    let outcome = h.ctx.finish_run();
    assert_eq!(outcome.distance, 0.0);
    assert!(outcome.path.is_empty());
}

#[test]
fn test_invalid_input_is_rejected_without_mutation() {
    let mut h = harness("2024-05-10 07:00:00");
    assert!(matches!(
        h.ctx.register_profile("   ", ProfileIcon::default()),
        Err(AppError::Validation(_))
    ));
    assert!(h.ctx.profiles().unwrap().is_empty());

    let profile = h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();
    for run in [
        NewRun::new(0.0, 5.0),
        NewRun::new(1500.0, 0.0),
        NewRun::new(-3.0, 5.0),
        NewRun::new(1500.0, f64::NAN),
    ] {
        let err = h.ctx.save_run(run).unwrap_err();
        assert!(err.is_user_facing(), "unexpected error: {}", err);
    }
    assert!(h.db.records(profile.id).unwrap().is_empty());

    assert!(h.ctx.set_goal_target(-1.0).is_err());
    assert_eq!(h.db.goal(profile.id).unwrap().unwrap().target, 10.0);
}

#[test]
fn test_voice_settings_persist_and_mute() {
    let mut h = harness("2024-05-10 07:00:00");
    h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    h.ctx
        .set_voice_settings(VoiceSettings {
            enabled: false,
            pitch: 5.0,
            ..VoiceSettings::default()
        })
        .unwrap();

    let stored = h.db.voice_settings().unwrap();
    assert!(!stored.enabled);
    assert_eq!(stored.pitch, 2.0);

    h.ctx.start_run();
    h.ctx.on_position(fix_at_km(0.0));
    assert!(h.ctx.on_position(fix_at_km(1.2)).is_some());
    assert!(h.spoken.borrow().is_empty());
}

#[test]
fn test_goal_resets_when_month_changes() {
    let mut h = harness("2024-05-31 23:00:00");
    h.ctx.register_profile("Aki", ProfileIcon::default()).unwrap();
    h.ctx.set_goal_target(3.0).unwrap();
    assert!(h.ctx.save_run(NewRun::new(1200.0, 4.0)).unwrap().goal_event.is_some());

    h.clock.set_local(at("2024-06-01 07:00:00"));
    let session = h.ctx.active_profile_mut().unwrap();
    assert_eq!(session.current_month_distance(), 0.0);
    let progress = session.goal_progress().unwrap();
    assert_eq!(progress.target, 3.0);
    assert!(!progress.reached);

    let saved = h.ctx.save_run(NewRun::new(1000.0, 3.0)).unwrap();
    assert!(saved.goal_event.is_some());
}

/// Store whose writes can be made to fail, either all of them or goal writes only.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    fail_goal_writes: AtomicBool,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst)
            || (key.starts_with("goal_") && self.fail_goal_writes.load(Ordering::SeqCst))
        {
            return Err(AppError::Storage("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

fn flaky_context() -> (Arc<FlakyStore>, RunDb, Rc<ManualClock>, RunContext) {
    let store = Arc::new(FlakyStore::default());
    let db = RunDb::new(store.clone());
    let clock = ManualClock::new(at("2024-05-10 07:00:00"));
    let ctx = RunContext::new(
        Config::default(),
        db.clone(),
        clock.clone(),
        PositionWatch::unavailable(),
        None,
    )
    .unwrap();
    (store, db, clock, ctx)
}

#[test]
fn test_failed_write_leaves_state_unchanged() {
    let (store, db, clock, mut ctx) = flaky_context();

    let profile = ctx.register_profile("Aki", ProfileIcon::default()).unwrap();
    let first = ctx.save_run(NewRun::new(1500.0, 5.0)).unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    clock.advance_secs(60.0);
    assert!(matches!(
        ctx.save_run(NewRun::new(1400.0, 5.0)),
        Err(AppError::Storage(_))
    ));
    assert!(matches!(
        ctx.delete_run(first.record.id),
        Err(AppError::Storage(_))
    ));

    let session = ctx.active_profile().unwrap();
    assert_eq!(session.records().len(), 1);
    assert_eq!(session.records().best_time(), Some(1500.0));
    assert_eq!(db.records(profile.id).unwrap().len(), 1);

    store.fail_writes.store(false, Ordering::SeqCst);
    assert!(ctx.delete_run(first.record.id).unwrap());
    assert!(db.records(profile.id).unwrap().is_empty());
}

#[test]
fn test_goal_write_failure_keeps_run_and_defers_celebration() {
    let (store, db, _clock, mut ctx) = flaky_context();
    let profile = ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    store.fail_goal_writes.store(true, Ordering::SeqCst);
    let saved = ctx.save_run(NewRun::new(3000.0, 10.0)).unwrap();
    assert_eq!(saved.goal_event, None);
    assert_eq!(db.records(profile.id).unwrap().len(), 1);
    assert!(!db.goal(profile.id).unwrap().unwrap().achieved);
    assert!(!ctx.active_profile().unwrap().goal().state().achieved);

    // Target changes are not applied in memory either
    assert!(matches!(
        ctx.set_goal_target(12.0),
        Err(AppError::Storage(_))
    ));
    assert_eq!(ctx.active_profile().unwrap().goal().target(), 10.0);

    store.fail_goal_writes.store(false, Ordering::SeqCst);
    let session = ctx.active_profile_mut().unwrap();
    assert!(matches!(
        session.check_goal().unwrap(),
        Some(CoreEvent::GoalAchieved { target_distance, .. }) if target_distance == 10.0
    ));
    assert!(db.goal(profile.id).unwrap().unwrap().achieved);
    assert_eq!(session.check_goal().unwrap(), None);
    assert_eq!(db.records(profile.id).unwrap().len(), 1);
}

#[test]
fn test_voice_kill_switch_survives_settings_update() {
    let spoken = Rc::new(RefCell::new(Vec::new()));
    let db = RunDb::new_in_memory();
    let mut ctx = RunContext::new(
        Config {
            voice_enabled: false,
            ..Config::default()
        },
        db.clone(),
        ManualClock::new(at("2024-05-10 07:00:00")),
        PositionWatch::unavailable(),
        Some(Box::new(RecordingVoice(spoken.clone()))),
    )
    .unwrap();
    ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    ctx.set_voice_settings(VoiceSettings::default()).unwrap();
    ctx.start_run();

    assert!(spoken.borrow().is_empty());
    assert!(!ctx.voice_settings().enabled);
    // The user's own preference is still what gets stored
    assert!(db.voice_settings().unwrap().enabled);
}

#[test]
fn test_unusable_default_goal_falls_back() {
    let db = RunDb::new_in_memory();
    let mut ctx = RunContext::new(
        Config {
            default_goal_km: 0.0,
            ..Config::default()
        },
        db.clone(),
        ManualClock::new(at("2024-05-10 07:00:00")),
        PositionWatch::unavailable(),
        None,
    )
    .unwrap();
    let profile = ctx.register_profile("Aki", ProfileIcon::default()).unwrap();

    let session = ctx.active_profile_mut().unwrap();
    assert_eq!(session.check_goal().unwrap(), None);
    assert_eq!(session.goal().target(), 10.0);
    assert_eq!(db.goal(profile.id).unwrap().unwrap().target, 10.0);
}
