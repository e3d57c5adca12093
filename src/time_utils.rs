// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for run time, pace and calendar-month handling.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown when no time or pace can be computed.
pub const NO_TIME: &str = "--:--";

/// Format elapsed seconds as `MM:SS.cc` (minutes are not wrapped at 60).
///
/// Each component is truncated, never rounded, so a running display never
/// shows a value ahead of the real clock.
pub fn format_clock(total_seconds: f64) -> String {
    let total = total_seconds.max(0.0);
    let minutes = (total / 60.0).floor() as u64;
    let seconds = total - (minutes as f64) * 60.0;
    let whole = seconds.floor();
    // Nudge before truncating so 125.34 does not render as .33
    let hundredths = (((seconds - whole) * 100.0) + 1e-6).floor().min(99.0) as u64;
    format!("{:02}:{:02}.{:02}", minutes, whole as u64, hundredths)
}

/// Format the pace for `total_seconds` over `distance` units as `M'SS"`.
///
/// Returns [`NO_TIME`] when the distance is zero or not a number.
pub fn format_pace(total_seconds: f64, distance: f64) -> String {
    if distance.is_nan() || distance <= 0.0 || !total_seconds.is_finite() {
        return NO_TIME.to_string();
    }
    let pace = (total_seconds / distance).floor() as u64;
    format!("{}'{:02}\"", pace / 60, pace % 60)
}

/// Format a distance in km with one decimal place.
pub fn format_km(distance: f64) -> String {
    format!("{:.1}km", distance)
}

/// A calendar month, serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {:?}", s))?;
        let year: i32 = year.parse().map_err(|_| format!("bad year in {:?}", s))?;
        let month: u32 = month.parse().map_err(|_| format!("bad month in {:?}", s))?;
        MonthKey::new(year, month).ok_or_else(|| format!("month out of range in {:?}", s))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
