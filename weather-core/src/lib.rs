//! Core library for the `weather` lookup.
//!
//! This crate defines:
//! - The data model handed to the presentation layer (`WeatherSnapshot`)
//! - Geocoding of free-text place names
//! - Hourly forecast retrieval and current-hour resolution
//! - Configuration of endpoints and request timeout
//!
//! It is used by `weather-cli`, but any front-end can drive it through
//! [`WeatherService`].

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod series;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Coordinates, LocationQuery, WeatherCondition, WeatherSnapshot};
pub use provider::{
    ForecastResolver, Geocoder, OpenMeteoForecast, OpenMeteoGeocoder, WeatherService,
    service_from_config,
};
pub use series::{HourlySeries, current_hour_key};
