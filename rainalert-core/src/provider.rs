use crate::{
    Config, ForecastResponse, Location, WeatherError,
    provider::{nominatim::NominatimGeocoder, open_meteo::OpenMeteoClient},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod nominatim;
pub mod open_meteo;

/// Turns a free-form place name into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Returns `Ok(None)` when the service knows no such place.
    async fn resolve(&self, city: &str) -> Result<Option<Location>, WeatherError>;
}

/// Fetches the hourly forecast series for a coordinate pair.
#[async_trait]
pub trait ForecastClient: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, WeatherError>;
}

/// Construct the geocoder described by the config endpoints.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    let endpoints = &config.endpoints;
    let geocoder = NominatimGeocoder::new(&endpoints.geocoder_url, &endpoints.user_agent)?;
    Ok(Box::new(geocoder))
}

/// Construct the forecast client described by the config endpoints and unit.
pub fn forecast_client_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastClient>> {
    let endpoints = &config.endpoints;
    let client = OpenMeteoClient::new(&endpoints.forecast_url, &endpoints.user_agent)?
        .with_temperature_unit(config.temperature_unit);
    Ok(Box::new(client))
}
