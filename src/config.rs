//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default weather endpoint (no API key required).
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Position fixes with an accuracy radius above this (meters) are noise.
pub const DEFAULT_GPS_ACCURACY_LIMIT: f64 = 50.0;

/// Monthly target used when a profile has never set one (km).
pub const DEFAULT_GOAL_KM: f64 = 10.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file backing the key-value store
    pub data_path: PathBuf,
    /// Goal target for profiles without a stored goal (km)
    pub default_goal_km: f64,
    /// Accuracy radius above which position samples are discarded
    pub gps_accuracy_limit: f64,
    /// Whether live position tracking is attempted at all
    pub gps_enabled: bool,
    /// Whether spoken announcements are attempted at all
    pub voice_enabled: bool,
    /// Weather forecast endpoint
    pub weather_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("runlog.json"),
            default_goal_km: DEFAULT_GOAL_KM,
            gps_accuracy_limit: DEFAULT_GPS_ACCURACY_LIMIT,
            gps_enabled: true,
            voice_enabled: true,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset values fall back to the defaults
    /// above, but a value that is set and unparseable is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_path: env::var("RUNLOG_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("runlog.json")),
            default_goal_km: parse_positive("RUNLOG_DEFAULT_GOAL_KM", DEFAULT_GOAL_KM)?,
            gps_accuracy_limit: parse_positive(
                "RUNLOG_GPS_ACCURACY_LIMIT",
                DEFAULT_GPS_ACCURACY_LIMIT,
            )?,
            gps_enabled: parse_var("RUNLOG_GPS_ENABLED", true)?,
            voice_enabled: parse_var("RUNLOG_VOICE_ENABLED", true)?,
            weather_url: env::var("RUNLOG_WEATHER_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Like `parse_var`, but the value must be a finite number above zero.
fn parse_positive(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_var(name, default)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(name, value.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
