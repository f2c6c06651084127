use std::time::Duration;

use thiserror::Error;

/// Failures that abort a forecast run.
///
/// Every variant is fatal for the current run; nothing is retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The city could not be turned into coordinates.
    #[error("Could not resolve location '{city}': {reason}")]
    GeocodeFailure { city: String, reason: String },

    /// Non-success status, transport error, or an error embedded in the body.
    #[error("Forecast request failed: {0}")]
    RequestFailure(String),

    #[error("Forecast request did not complete within {0:?}")]
    Timeout(Duration),

    /// Forecast data was read before any fetch completed.
    #[error("No forecast data available: fetch has not completed")]
    EmptyResult,

    #[error("Requested {requested} hourly entries but the series only holds {available}")]
    IndexOutOfRange { requested: usize, available: usize },
}

impl WeatherError {
    pub(crate) fn geocode(city: &str, reason: impl Into<String>) -> Self {
        WeatherError::GeocodeFailure {
            city: city.to_string(),
            reason: reason.into(),
        }
    }
}

/// Shortens a response body so it fits in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
