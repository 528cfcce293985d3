use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    error::WeatherError,
    model::{Coordinates, LocationQuery},
};

use super::{Geocoder, get_json};

/// How many candidates to ask for. Only the first is ever used.
pub const CANDIDATE_COUNT: u8 = 10;
pub const LANGUAGE: &str = "en";

/// Open-Meteo geocoding search (`/v1/search`).
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    endpoint: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    // Omitted entirely by the API when nothing matches.
    results: Option<Vec<GeoCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    country: Option<String>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, WeatherError> {
        let count = CANDIDATE_COUNT.to_string();
        let params = [
            ("name", query.as_str()),
            ("count", count.as_str()),
            ("language", LANGUAGE),
            ("format", "json"),
        ];

        let parsed: GeoResponse = get_json(&self.http, &self.endpoint, &params, "geocoding").await?;

        let candidates = parsed.results.unwrap_or_default();

        // First candidate is canonical; no ranking by population or country.
        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        info!(
            name = first.name.as_deref().unwrap_or("?"),
            country = first.country.as_deref().unwrap_or("?"),
            latitude = first.latitude,
            longitude = first.longitude,
            "resolved location"
        );

        Ok(Coordinates { latitude: first.latitude, longitude: first.longitude })
    }
}
