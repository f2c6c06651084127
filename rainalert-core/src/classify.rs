use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Lower bound (°C) of the moderate bucket.
pub const MODERATE_FROM_C: f64 = 15.0;
/// Lower bound (°C) of the high bucket.
pub const HIGH_FROM_C: f64 = 23.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Parses a unit string, treating anything unrecognised as Celsius.
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(unit = value, "unknown temperature unit, assuming Celsius");
            TemperatureUnit::Celsius
        })
    }

    pub fn to_celsius(&self, temperature: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => temperature,
            TemperatureUnit::Fahrenheit => (temperature - 32.0) * 5.0 / 9.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().trim_start_matches('°').to_lowercase();

        match lower.as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: C, F."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low temperature",
            Severity::Moderate => "moderate temperature",
            Severity::High => "high temperature",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets a temperature reading, converting from Fahrenheit first when needed.
pub fn classify(temperature: f64, unit: TemperatureUnit) -> Severity {
    let celsius = unit.to_celsius(temperature);

    if celsius < MODERATE_FROM_C {
        Severity::Low
    } else if celsius < HIGH_FROM_C {
        Severity::Moderate
    } else {
        Severity::High
    }
}

/// Same as [`classify`] but takes the unit as reported on the wire ("C", "°F", ...).
pub fn classify_str(temperature: f64, unit: &str) -> Severity {
    classify(temperature, TemperatureUnit::parse_lossy(unit))
}
