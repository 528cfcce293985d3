use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, LocationQuery, WeatherSnapshot},
};

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

/// Turns a place name into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, WeatherError>;
}

/// Fetches the hourly series for a point and picks out the current sample.
#[async_trait]
pub trait ForecastResolver: Send + Sync + Debug {
    /// Resolve the snapshot for the hour containing `now` (local wall-clock time).
    async fn fetch_at(
        &self,
        coords: Coordinates,
        now: NaiveDateTime,
    ) -> Result<WeatherSnapshot, WeatherError>;

    async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_at(coords, Local::now().naive_local()).await
    }
}

/// Geocoder followed by forecast resolution, one request after the other.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastResolver>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, forecast: Box<dyn ForecastResolver>) -> Self {
        Self { geocoder, forecast }
    }

    pub async fn lookup(&self, name: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.lookup_at(name, Local::now().naive_local()).await
    }

    #[instrument(skip(self))]
    pub async fn lookup_at(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let query = LocationQuery::new(name);
        let coords = self.geocoder.resolve(&query).await?;
        self.forecast.fetch_at(coords, now).await
    }
}

/// Build the HTTP client shared by both Open-Meteo endpoints.
pub fn http_client(config: &Config) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| WeatherError::Transport(format!("Failed to build HTTP client: {e}")))
}

/// Construct the Open-Meteo backed service from config.
pub fn service_from_config(config: &Config) -> Result<WeatherService, WeatherError> {
    let http = http_client(config)?;

    Ok(WeatherService::new(
        Box::new(OpenMeteoGeocoder::new(http.clone(), config.geocoding_url.clone())),
        Box::new(OpenMeteoForecast::new(http, config.forecast_url.clone())),
    ))
}

/// GET `url` with `query`, require a 2xx status and decode the body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
    what: &str,
) -> Result<T, WeatherError> {
    let res = http.get(url).query(query).send().await.map_err(|e| {
        WeatherError::Transport(format!("Failed to send {what} request: {e}"))
    })?;

    debug!(url = %res.url(), status = %res.status(), "{what} response");

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::Transport(format!("Failed to read {what} response body: {e}")))?;

    if !status.is_success() {
        return Err(WeatherError::Transport(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        WeatherError::MalformedResponse(format!("Failed to parse {what} JSON: {e}"))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
