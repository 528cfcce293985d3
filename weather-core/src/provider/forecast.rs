use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
    series::HourlySeries,
};

use super::{ForecastResolver, get_json};

/// Timezone the hourly axis is requested in. Not user-configurable.
pub const FORECAST_TIMEZONE: &str = "Europe/London";
pub const HOURLY_VARIABLES: &str = "temperature_2m,relativehumidity_2m,weathercode,windspeed_10m";

/// Open-Meteo hourly forecast (`/v1/forecast`).
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    endpoint: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    async fn fetch_series(&self, coords: Coordinates) -> Result<HourlySeries, WeatherError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();
        let params = [
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("hourly", HOURLY_VARIABLES),
            ("timezone", FORECAST_TIMEZONE),
        ];

        let parsed: ForecastResponse =
            get_json(&self.http, &self.endpoint, &params, "forecast").await?;

        let hourly = parsed.hourly.ok_or_else(|| {
            WeatherError::MalformedResponse("forecast response has no 'hourly' object".into())
        })?;

        hourly.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyPayload>,
}

#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<Option<f64>>>,
    weathercode: Option<Vec<Option<i64>>>,
    relativehumidity_2m: Option<Vec<Option<u8>>>,
    windspeed_10m: Option<Vec<Option<f64>>>,
}

fn required<T>(column: Option<Vec<T>>, name: &str) -> Result<Vec<T>, WeatherError> {
    column.ok_or_else(|| WeatherError::MalformedResponse(format!("missing hourly.{name}")))
}

impl TryFrom<HourlyPayload> for HourlySeries {
    type Error = WeatherError;

    fn try_from(p: HourlyPayload) -> Result<Self, Self::Error> {
        HourlySeries::new(
            required(p.time, "time")?,
            required(p.temperature_2m, "temperature_2m")?,
            required(p.weathercode, "weathercode")?,
            required(p.relativehumidity_2m, "relativehumidity_2m")?,
            required(p.windspeed_10m, "windspeed_10m")?,
        )
    }
}

#[async_trait]
impl ForecastResolver for OpenMeteoForecast {
    #[instrument(skip(self), fields(lat = %coords.latitude, lon = %coords.longitude))]
    async fn fetch_at(
        &self,
        coords: Coordinates,
        now: NaiveDateTime,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let series = self.fetch_series(coords).await?;
        debug!(samples = series.len(), "parsed hourly series");

        series.snapshot_for(now)
    }
}
