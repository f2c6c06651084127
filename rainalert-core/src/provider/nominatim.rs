use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::{WeatherError, truncate_body},
    model::Location,
};

use super::Geocoder;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Forward geocoding through a Nominatim (OpenStreetMap) search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    /// `base_url` is the service root, e.g. `https://nominatim.openstreetmap.org`.
    pub fn new(base_url: &str, user_agent: &str) -> anyhow::Result<Self> {
        // Nominatim's usage policy rejects requests without an identifying agent.
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for Nominatim")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, city: &str) -> Result<Option<Location>, WeatherError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(WeatherError::geocode(city, "city name is empty"));
        }

        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, city = query, "geocoding city");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::geocode(city, format!("request to Nominatim failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::geocode(city, format!("failed to read Nominatim response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(WeatherError::geocode(
                city,
                format!(
                    "Nominatim returned status {}: {}",
                    status,
                    truncate_body(&body)
                ),
            ));
        }

        let places: Vec<NominatimPlace> = serde_json::from_str(&body).map_err(|e| {
            WeatherError::geocode(city, format!("failed to parse Nominatim JSON: {e}"))
        })?;

        let Some(place) = places.into_iter().next() else {
            tracing::warn!(city = query, "Nominatim returned no match");
            return Ok(None);
        };

        let latitude = parse_coordinate(city, "lat", &place.lat)?;
        let longitude = parse_coordinate(city, "lon", &place.lon)?;

        tracing::info!(city = query, latitude, longitude, address = %place.display_name, "resolved city");

        Ok(Some(Location {
            query: query.to_string(),
            latitude,
            longitude,
            address: place.display_name,
        }))
    }
}

fn parse_coordinate(city: &str, field: &str, raw: &str) -> Result<f64, WeatherError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::geocode(city, format!("invalid {field} value '{raw}'")))
}
