use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    classify::TemperatureUnit,
    model::{
        DEFAULT_CITY, DEFAULT_HORIZON, DEFAULT_PRECIPITATION_MIN, DEFAULT_TEMPERATURE_MAX,
        DEFAULT_TIMEOUT_SECS, Thresholds,
    },
};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("rainalert/", env!("CARGO_PKG_VERSION"));

/// Service endpoints; only worth overriding for self-hosted instances.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Every field is optional in the file; command-line flags win over it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub city: String,
    pub temperature_max: f64,
    pub precipitation_min: f64,
    /// Number of hourly entries to scan.
    pub hours: usize,
    pub timeout_secs: u64,
    /// Example TOML:
    /// temperature_unit = "fahrenheit"
    pub temperature_unit: TemperatureUnit,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            temperature_max: DEFAULT_TEMPERATURE_MAX,
            precipitation_min: DEFAULT_PRECIPITATION_MIN,
            hours: DEFAULT_HORIZON,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature_unit: TemperatureUnit::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "rainalert", "rainalert")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.temperature_max, self.precipitation_min)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
