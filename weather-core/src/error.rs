use thiserror::Error;

/// Failures surfaced by the lookup pipeline.
///
/// The core never hands back a partially-populated snapshot: every step either
/// produces its value or fails with one of these.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoder returned no candidates for the query.
    #[error("No location found matching '{0}'")]
    NotFound(String),

    /// The request could not complete or came back with a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The payload was not JSON, or lacked the expected fields or lengths.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
