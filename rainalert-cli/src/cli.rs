use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use rainalert_core::{
    Config, Pipeline,
    provider::{forecast_client_from_config, geocoder_from_config},
    write_report,
};
use tracing_subscriber::EnvFilter;

/// Warns about cold, rainy hours in the upcoming forecast for a city.
#[derive(Debug, Parser)]
#[command(name = "rainalert", version, about = "Hourly cold and rain warnings")]
pub struct Cli {
    /// Report hours colder than this temperature (in the configured unit, Celsius by default).
    #[arg(short = 't', long = "temp")]
    pub temp: Option<f64>,

    /// Report hours with more rain than this, in mm.
    #[arg(short = 'r', long = "rain")]
    pub rain: Option<f64>,

    /// City to look up.
    #[arg(short = 'c', long = "city")]
    pub city: Option<String>,

    /// Number of hourly entries to scan.
    #[arg(long, value_parser = parse_hours)]
    pub hours: Option<usize>,

    /// Seconds to wait for the forecast before giving up.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_hours(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(hours) => Ok(hours),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    /// Applies command-line overrides on top of the loaded config.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(city) = &self.city {
            cfg.city = city.clone();
        }
        if let Some(temp) = self.temp {
            cfg.temperature_max = temp;
        }
        if let Some(rain) = self.rain {
            cfg.precipitation_min = rain;
        }
        if let Some(hours) = self.hours {
            cfg.hours = hours;
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }

        Ok(cfg)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let cfg = self.resolve_config()?;
        let thresholds = cfg.thresholds();

        tracing::debug!(?cfg, "effective configuration");

        let pipeline = Pipeline::new(
            geocoder_from_config(&cfg)?,
            forecast_client_from_config(&cfg)?,
        )
        .with_timeout(cfg.timeout())
        .with_horizon(cfg.hours);

        let report = pipeline
            .run(&cfg.city, &thresholds)
            .await
            .with_context(|| format!("Could not produce a forecast report for '{}'", cfg.city))?;

        let mut stdout = std::io::stdout().lock();
        write_report(&mut stdout, &cfg.city, &report.units, &report.matches)
            .context("Failed to write report to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;

        Ok(())
    }
}
