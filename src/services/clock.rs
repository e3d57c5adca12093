//! Time sources.
//!
//! Session timing reads a monotonic instant; record dates and goal months
//! read the local calendar date. Both come from one `Clock` so tests can
//! drive them together.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic instant used for elapsed-time measurement.
    fn now(&self) -> Instant;
    /// Local wall-clock date and time.
    fn local_now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }

    /// Milliseconds since the Unix epoch, used to derive record and profile ids.
    ///
    /// The default reads the local wall time as if it were UTC, which only
    /// suits clocks without a time zone.
    fn epoch_millis(&self) -> i64 {
        self.local_now().and_utc().timestamp_millis()
    }
}

/// Shared handle to a clock.
pub type SharedClock = Rc<dyn Clock>;

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn epoch_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Manually advanced clock for replays and tests.
#[derive(Debug)]
pub struct ManualClock {
    base_instant: Instant,
    base_time: NaiveDateTime,
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Rc<Self> {
        Rc::new(Self {
            base_instant: Instant::now(),
            base_time: start,
            offset: Cell::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// Jump the calendar to a new date/time. The monotonic clock keeps running forward.
    pub fn set_local(&self, at: NaiveDateTime) {
        let delta = at - self.local_now();
        if let Ok(forward) = delta.to_std() {
            self.advance(forward);
        } else {
            tracing::warn!(%at, "ManualClock cannot move backwards; ignoring");
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base_instant + self.offset.get()
    }

    fn local_now(&self) -> NaiveDateTime {
        // Offsets stay far below chrono's limits
        self.base_time + chrono::Duration::from_std(self.offset.get()).unwrap_or_default()
    }
}
