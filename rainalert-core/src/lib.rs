//! Core library for the `rainalert` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Geocoding and forecast clients behind small async traits
//! - The threshold filter and temperature classifier
//! - A pipeline that runs geocode, fetch and filter in sequence
//!
//! It is used by `rainalert-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod report;

pub use classify::{Severity, TemperatureUnit, classify, classify_str};
pub use config::{Config, Endpoints};
pub use error::WeatherError;
pub use filter::filter;
pub use model::{
    ForecastResponse, HourlyRecord, HourlySeries, Location, MatchedRecord, Thresholds, Units,
};
pub use pipeline::{ForecastSession, Pipeline, Report};
pub use provider::{ForecastClient, Geocoder};
pub use report::write_report;
