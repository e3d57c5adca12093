// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error taxonomy for the run-log core.
//!
//! "No data yet" is never an error here: empty collections surface as
//! `None` from the query functions instead.

/// Core error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected user input. The operation was aborted before mutating state.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Position stream or voice output is missing or permission was denied.
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt stored data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Weather lookup failed: {0}")]
    Weather(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors the UI should show to the user as a form problem.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, reason)
            })
            .collect();
        AppError::Validation(fields.join(", "))
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AppError>;
