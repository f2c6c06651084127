use std::time::Duration;

use crate::{
    error::WeatherError,
    filter::filter,
    model::{
        DEFAULT_HORIZON, DEFAULT_TIMEOUT_SECS, ForecastResponse, Location, MatchedRecord,
        Thresholds, Units,
    },
    provider::{ForecastClient, Geocoder},
};

/// Forecast data for one resolved location.
///
/// The response is only stored once a fetch has fully succeeded.
#[derive(Debug, Clone)]
pub struct ForecastSession {
    location: Location,
    response: Option<ForecastResponse>,
}

impl ForecastSession {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            response: None,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Fetches the forecast for this location, abandoning the request after `timeout`.
    pub async fn fetch(
        &mut self,
        client: &dyn ForecastClient,
        timeout: Duration,
    ) -> Result<&ForecastResponse, WeatherError> {
        let request = client.fetch(self.location.latitude, self.location.longitude);

        let response = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| WeatherError::Timeout(timeout))??;

        Ok(&*self.response.insert(response))
    }

    pub fn forecast(&self) -> Result<&ForecastResponse, WeatherError> {
        self.response.as_ref().ok_or(WeatherError::EmptyResult)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    pub location: Location,
    pub units: Units,
    pub matches: Vec<MatchedRecord>,
}

/// Geocode, fetch and filter, strictly in that order.
#[derive(Debug)]
pub struct Pipeline {
    geocoder: Box<dyn Geocoder>,
    client: Box<dyn ForecastClient>,
    timeout: Duration,
    horizon: usize,
}

impl Pipeline {
    pub fn new(geocoder: Box<dyn Geocoder>, client: Box<dyn ForecastClient>) -> Self {
        Self {
            geocoder,
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            horizon: DEFAULT_HORIZON,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub async fn run(&self, city: &str, thresholds: &Thresholds) -> Result<Report, WeatherError> {
        let location = tokio::time::timeout(self.timeout, self.geocoder.resolve(city))
            .await
            .map_err(|_| {
                WeatherError::geocode(
                    city,
                    format!("geocoder did not answer within {:?}", self.timeout),
                )
            })??
            .ok_or_else(|| WeatherError::geocode(city, "no matching place found"))?;

        let mut session = ForecastSession::new(location);
        session.fetch(self.client.as_ref(), self.timeout).await?;

        let forecast = session.forecast()?;
        let matches = filter(&forecast.hourly, thresholds, self.horizon)?;
        let units = forecast.hourly_units.clone();

        tracing::info!(
            city,
            matched = matches.len(),
            horizon = self.horizon,
            "forecast run complete"
        );

        Ok(Report {
            location: session.location,
            units,
            matches,
        })
    }
}
