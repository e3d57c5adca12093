// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-weather lookup for pre-filling run conditions.
//!
//! Failures are reported to the caller, which keeps whatever the user
//! already selected.

use crate::error::AppError;
use crate::models::Weather;
use serde::Deserialize;
use std::future::Future;

/// Current conditions at a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReport {
    /// Air temperature (°C)
    pub temperature: f64,
    /// WMO weather interpretation code
    pub condition_code: i64,
}

impl WeatherReport {
    pub fn condition(&self) -> Weather {
        Weather::from_code(self.condition_code)
    }
}

/// Source of current weather.
pub trait WeatherLookup {
    fn current(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<WeatherReport, AppError>> + Send;
}

/// Open-Meteo forecast API client.
#[derive(Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl WeatherLookup for OpenMeteoClient {
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, AppError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Weather(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Weather lookup rejected");
            return Err(AppError::Weather(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Weather(e.to_string()))?;
        parse_forecast(&body)
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i64,
}

/// Parse an Open-Meteo forecast body.
pub fn parse_forecast(body: &str) -> Result<WeatherReport, AppError> {
    let forecast: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Weather(format!("JSON parse error: {}", e)))?;
    let current = forecast
        .current_weather
        .ok_or_else(|| AppError::Weather("response has no current_weather".to_string()))?;
    Ok(WeatherReport {
        temperature: current.temperature,
        condition_code: current.weathercode,
    })
}
