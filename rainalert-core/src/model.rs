use serde::Deserialize;

use crate::{classify::TemperatureUnit, error::WeatherError};

/// Number of hourly points requested by default (seven days).
pub const DEFAULT_HORIZON: usize = 168;
pub const DEFAULT_TEMPERATURE_MAX: f64 = 21.0;
pub const DEFAULT_PRECIPITATION_MIN: f64 = 0.0;
pub const DEFAULT_TEMPERATURE_UNIT: &str = "C";
pub const DEFAULT_PRECIPITATION_UNIT: &str = "mm";
pub const DEFAULT_CITY: &str = "wroclaw";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Field selector sent as the `hourly` query parameter.
pub const HOURLY_FIELDS: &str = "temperature_2m,rain";

/// A geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// City name as the user typed it.
    pub query: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Full display address reported by the geocoder.
    pub address: String,
}

/// Unit strings reported alongside the hourly series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Units {
    #[serde(rename = "temperature_2m", default = "default_temperature_unit")]
    pub temperature: String,
    #[serde(rename = "rain", default = "default_precipitation_unit")]
    pub precipitation: String,
}

fn default_temperature_unit() -> String {
    DEFAULT_TEMPERATURE_UNIT.to_string()
}

fn default_precipitation_unit() -> String {
    DEFAULT_PRECIPITATION_UNIT.to_string()
}

impl Default for Units {
    fn default() -> Self {
        Self {
            temperature: default_temperature_unit(),
            precipitation: default_precipitation_unit(),
        }
    }
}

impl Units {
    /// Temperature unit used to classify readings; unknown strings count as Celsius.
    pub fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::parse_lossy(&self.temperature)
    }
}

/// Parallel hourly arrays as returned on the wire.
///
/// Index `i` of every array describes the same hour. Readings may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<Option<f64>>,
    #[serde(rename = "rain")]
    pub precipitation: Vec<Option<f64>>,
}

/// One complete hour of the series.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub timestamp: String,
    pub temperature: f64,
    pub precipitation: f64,
}

impl HourlySeries {
    /// Number of hours for which all three arrays hold an entry.
    pub fn aligned_len(&self) -> usize {
        self.time
            .len()
            .min(self.temperature.len())
            .min(self.precipitation.len())
    }

    /// Yields the first `horizon` hours in order, skipping hours with a missing reading.
    ///
    /// Fails if any array is shorter than `horizon`.
    pub fn records(
        &self,
        horizon: usize,
    ) -> Result<impl Iterator<Item = HourlyRecord> + '_, WeatherError> {
        let available = self.aligned_len();
        if horizon > available {
            return Err(WeatherError::IndexOutOfRange {
                requested: horizon,
                available,
            });
        }

        Ok((0..horizon).filter_map(move |idx| {
            match (self.temperature[idx], self.precipitation[idx]) {
                (Some(temperature), Some(precipitation)) => Some(HourlyRecord {
                    timestamp: self.time[idx].clone(),
                    temperature,
                    precipitation,
                }),
                _ => {
                    tracing::debug!(time = %self.time[idx], "skipping hour with missing reading");
                    None
                }
            }
        }))
    }
}

/// Decoded forecast payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub hourly_units: Units,
    pub hourly: HourlySeries,
}

/// Exclusive bounds a record has to fall within to be reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Matching hours are strictly colder than this.
    pub temperature_max: f64,
    /// Matching hours have strictly more rain than this.
    pub precipitation_min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_max: DEFAULT_TEMPERATURE_MAX,
            precipitation_min: DEFAULT_PRECIPITATION_MIN,
        }
    }
}

impl Thresholds {
    pub fn new(temperature_max: f64, precipitation_min: f64) -> Self {
        Self {
            temperature_max,
            precipitation_min,
        }
    }

    pub fn matches(&self, record: &HourlyRecord) -> bool {
        record.temperature < self.temperature_max && record.precipitation > self.precipitation_min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRecord {
    pub temperature: f64,
    pub precipitation: f64,
    pub timestamp: String,
}

impl From<HourlyRecord> for MatchedRecord {
    fn from(record: HourlyRecord) -> Self {
        Self {
            temperature: record.temperature,
            precipitation: record.precipitation,
            timestamp: record.timestamp,
        }
    }
}
