use serde::{Deserialize, Serialize};

/// Free-text place name as typed by the user, whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Trim and collapse every whitespace run into a single space.
    ///
    /// Empty or whitespace-only input is passed through as an empty query;
    /// the geocoder decides what that means.
    pub fn new(raw: &str) -> Self {
        Self(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coarse sky/precipitation category derived from a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Unknown,
}

impl WeatherCondition {
    /// Map a provider weather code to a category.
    ///
    /// Arms are evaluated top to bottom; 4, 68..=70, 78..=79, negatives and
    /// anything above 99 fall through to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1..=3 => WeatherCondition::Cloudy,
            5..=67 | 80..=99 => WeatherCondition::Rain,
            71..=77 => WeatherCondition::Snow,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Unknown => "Unknown",
        }
    }

    /// Icon key for the presentation layer. `None` means "keep whatever is shown".
    pub fn icon_name(&self) -> Option<&'static str> {
        match self {
            WeatherCondition::Clear => Some("clear"),
            WeatherCondition::Cloudy => Some("cloudy"),
            WeatherCondition::Rain => Some("rain"),
            WeatherCondition::Snow => Some("snow"),
            WeatherCondition::Unknown => None,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The single value handed to the UI. Fields are read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    temperature_c: f64,
    condition: WeatherCondition,
    humidity_pct: u8,
    wind_speed_kmh: f64,
}

impl WeatherSnapshot {
    pub fn new(
        temperature_c: f64,
        condition: WeatherCondition,
        humidity_pct: u8,
        wind_speed_kmh: f64,
    ) -> Self {
        Self { temperature_c, condition, humidity_pct, wind_speed_kmh }
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn condition(&self) -> WeatherCondition {
        self.condition
    }

    pub fn humidity_pct(&self) -> u8 {
        self.humidity_pct
    }

    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_kmh
    }
}
