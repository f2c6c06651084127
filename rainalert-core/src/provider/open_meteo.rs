use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    classify::TemperatureUnit,
    error::{WeatherError, truncate_body},
    model::{ForecastResponse, HOURLY_FIELDS},
};

use super::ForecastClient;

/// Hourly forecast client for the Open-Meteo API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    temperature_unit: TemperatureUnit,
    http: Client,
}

impl OpenMeteoClient {
    /// `base_url` is the API root, e.g. `https://api.open-meteo.com`.
    pub fn new(base_url: &str, user_agent: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature_unit: TemperatureUnit::Celsius,
            http,
        })
    }

    /// Ask the API to report temperatures in `unit`.
    pub fn with_temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = unit;
        self
    }

    fn query(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
        ];
        if self.temperature_unit == TemperatureUnit::Fahrenheit {
            query.push(("temperature_unit", self.temperature_unit.as_str().to_string()));
        }
        query
    }
}

/// Error envelope Open-Meteo puts in the body, e.g. `{"error": true, "reason": "..."}`.
#[derive(Debug, Deserialize)]
struct OmErrorBody {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

fn embedded_error(body: &str) -> Option<OmErrorBody> {
    serde_json::from_str::<OmErrorBody>(body)
        .ok()
        .filter(|e| e.error)
}

#[async_trait]
impl ForecastClient for OpenMeteoClient {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        tracing::debug!(%url, latitude, longitude, "requesting hourly forecast");

        let res = self
            .http
            .get(&url)
            .query(&self.query(latitude, longitude))
            .send()
            .await
            .map_err(|e| {
                WeatherError::RequestFailure(format!("failed to send request to Open-Meteo: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::RequestFailure(format!("failed to read Open-Meteo response body: {e}"))
        })?;

        if !status.is_success() {
            let detail = embedded_error(&body)
                .and_then(|e| e.reason)
                .unwrap_or_else(|| truncate_body(&body));
            return Err(WeatherError::RequestFailure(format!(
                "Open-Meteo returned status {status}: {detail}"
            )));
        }

        // A 200 can still carry an error payload.
        if let Some(err) = embedded_error(&body) {
            return Err(WeatherError::RequestFailure(
                err.reason
                    .unwrap_or_else(|| "Open-Meteo reported an unspecified error".to_string()),
            ));
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::RequestFailure(format!("failed to parse Open-Meteo forecast JSON: {e}"))
        })?;

        tracing::debug!(
            hours = parsed.hourly.aligned_len(),
            unit = %parsed.hourly_units.temperature,
            "received hourly forecast"
        );

        Ok(parsed)
    }
}
