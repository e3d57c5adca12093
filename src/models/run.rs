// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run record model and its supporting value types.

use chrono::NaiveDate;
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Weather during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl Weather {
    /// Map a WMO weather interpretation code onto the four run conditions.
    ///
    /// Codes outside the known bands count as sunny.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Weather::Sunny,
            1..=48 => Weather::Cloudy,
            51..=67 | 80..=99 => Weather::Rainy,
            71..=77 => Weather::Snowy,
            _ => Weather::Sunny,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Weather::Sunny => "☀️",
            Weather::Cloudy => "☁️",
            Weather::Rainy => "⛆",
            Weather::Snowy => "❄️",
        }
    }
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A single fix from the position stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub point: GeoPoint,
    /// Accuracy radius reported by the device (meters)
    pub accuracy: f64,
}

impl PositionSample {
    pub fn new(lat: f64, lon: f64, accuracy: f64) -> Self {
        Self {
            point: GeoPoint::new(lat, lon),
            accuracy,
        }
    }
}

/// A finalized, persisted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunRecord {
    /// Creation time in milliseconds, strictly increasing within a profile
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub date: NaiveDate,
    pub elapsed_seconds: f64,
    /// Distance in km
    pub distance: f64,
    /// Display pace per km, e.g. `5'12"`
    pub pace: String,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Recomputed by the record store on every mutation; never trusted from storage.
    #[serde(default)]
    pub is_personal_best: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<GeoPoint>>,
}

impl RunRecord {
    /// Recorded route as a line string (x = longitude, y = latitude).
    ///
    /// `None` unless at least two points were recorded.
    pub fn route(&self) -> Option<LineString<f64>> {
        let path = self.path.as_ref().filter(|p| p.len() > 1)?;
        Some(LineString::from(
            path.iter()
                .map(|p| Coord { x: p.lon, y: p.lat })
                .collect::<Vec<_>>(),
        ))
    }

    /// Route encoded as a precision-5 polyline for map rendering.
    pub fn encoded_route(&self) -> Option<String> {
        let line = self.route()?;
        match polyline::encode_coordinates(line, 5) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::warn!(record_id = self.id, error = %e, "Failed to encode route");
                None
            }
        }
    }
}

/// Input for saving a run.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewRun {
    #[validate(range(exclusive_min = 0.0, message = "time must be greater than zero"))]
    pub elapsed_seconds: f64,
    #[validate(range(exclusive_min = 0.0, message = "distance must be greater than zero"))]
    pub distance: f64,
    pub weather: Weather,
    pub temperature: Option<f64>,
    pub path: Vec<GeoPoint>,
}

impl NewRun {
    pub fn new(elapsed_seconds: f64, distance: f64) -> Self {
        Self {
            elapsed_seconds,
            distance,
            ..Default::default()
        }
    }

    pub fn with_weather(mut self, weather: Weather, temperature: Option<f64>) -> Self {
        self.weather = weather;
        self.temperature = temperature;
        self
    }

    pub fn with_path(mut self, path: Vec<GeoPoint>) -> Self {
        self.path = path;
        self
    }
}
