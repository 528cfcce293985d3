use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{WeatherCondition, WeatherSnapshot},
};

/// Format used by the forecast provider for hourly timestamps, e.g. `2024-03-10T14:00`.
const HOUR_KEY_FORMAT: &str = "%Y-%m-%dT%H:00";

/// Wall-clock time truncated to the hour, in the provider's timestamp format.
pub fn current_hour_key(now: NaiveDateTime) -> String {
    now.format(HOUR_KEY_FORMAT).to_string()
}

/// Parallel hourly arrays sharing one time axis.
///
/// Construction guarantees every column has the same length as `time`.
/// Individual samples may be absent; only the one that is read must be present.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    time: Vec<String>,
    temperature_c: Vec<Option<f64>>,
    weather_code: Vec<Option<i64>>,
    humidity_pct: Vec<Option<u8>>,
    wind_speed_kmh: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn new(
        time: Vec<String>,
        temperature_c: Vec<Option<f64>>,
        weather_code: Vec<Option<i64>>,
        humidity_pct: Vec<Option<u8>>,
        wind_speed_kmh: Vec<Option<f64>>,
    ) -> Result<Self, WeatherError> {
        let expected = time.len();
        let columns = [
            ("temperature_2m", temperature_c.len()),
            ("weathercode", weather_code.len()),
            ("relativehumidity_2m", humidity_pct.len()),
            ("windspeed_10m", wind_speed_kmh.len()),
        ];

        for (name, len) in columns {
            if len != expected {
                return Err(WeatherError::MalformedResponse(format!(
                    "hourly.{name} has {len} entries but hourly.time has {expected}"
                )));
            }
        }

        Ok(Self { time, temperature_c, weather_code, humidity_pct, wind_speed_kmh })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Index of the first timestamp equal (ignoring ASCII case) to the current
    /// hour key. Falls back to 0 when the hour is not in the series.
    pub fn current_index(&self, now: NaiveDateTime) -> usize {
        let key = current_hour_key(now);

        match self.time.iter().position(|t| t.eq_ignore_ascii_case(&key)) {
            Some(index) => {
                debug!(%key, index, "matched current hour");
                index
            }
            None => {
                warn!(%key, len = self.len(), "current hour not in series, using first sample");
                0
            }
        }
    }

    pub fn snapshot_at(&self, index: usize) -> Result<WeatherSnapshot, WeatherError> {
        if index >= self.len() {
            return Err(WeatherError::MalformedResponse(format!(
                "index {index} is out of range for {} hourly samples",
                self.len()
            )));
        }

        let temperature_c = sample(&self.temperature_c, index, "temperature_2m")?;
        let code = sample(&self.weather_code, index, "weathercode")?;
        let humidity_pct = sample(&self.humidity_pct, index, "relativehumidity_2m")?;
        let wind_speed_kmh = sample(&self.wind_speed_kmh, index, "windspeed_10m")?;

        Ok(WeatherSnapshot::new(
            temperature_c,
            WeatherCondition::from_code(code),
            humidity_pct,
            wind_speed_kmh,
        ))
    }

    /// Snapshot for the sample matching `now`'s hour (or the first sample).
    pub fn snapshot_for(&self, now: NaiveDateTime) -> Result<WeatherSnapshot, WeatherError> {
        self.snapshot_at(self.current_index(now))
    }
}

fn sample<T: Copy>(column: &[Option<T>], index: usize, name: &str) -> Result<T, WeatherError> {
    column.get(index).copied().flatten().ok_or_else(|| {
        WeatherError::MalformedResponse(format!("hourly.{name}[{index}] is null"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 42)
            .unwrap()
    }

    fn three_hours(times: [&str; 3]) -> HourlySeries {
        HourlySeries::new(
            times.iter().map(|t| t.to_string()).collect(),
            vec![Some(1.5), Some(2.5), Some(3.5)],
            vec![Some(0), Some(61), Some(73)],
            vec![Some(40), Some(50), Some(60)],
            vec![Some(4.0), Some(5.0), Some(6.0)],
        )
        .unwrap()
    }

    #[test]
    fn hour_key_truncates_minutes_and_seconds() {
        assert_eq!(current_hour_key(at(14, 37)), "2024-03-10T14:00");
        assert_eq!(current_hour_key(at(0, 0)), "2024-03-10T00:00");
    }

    #[test]
    fn matching_hour_selects_its_index() {
        let series = three_hours(["2024-03-10T12:00", "2024-03-10T13:00", "2024-03-10T14:00"]);

        assert_eq!(series.current_index(at(14, 5)), 2);

        let snap = series.snapshot_for(at(14, 5)).unwrap();
        assert_eq!(snap.temperature_c(), 3.5);
        assert_eq!(snap.condition(), WeatherCondition::Snow);
        assert_eq!(snap.humidity_pct(), 60);
        assert_eq!(snap.wind_speed_kmh(), 6.0);
    }

    #[test]
    fn match_ignores_case() {
        let series = three_hours(["2024-03-10t12:00", "2024-03-10t13:00", "2024-03-10t14:00"]);
        assert_eq!(series.current_index(at(13, 59)), 1);
    }

    #[test]
    fn first_duplicate_wins() {
        let series = three_hours(["2024-03-10T11:00", "2024-03-10T13:00", "2024-03-10T13:00"]);
        assert_eq!(series.current_index(at(13, 0)), 1);
    }

    #[test]
    fn missing_hour_falls_back_to_first_sample() {
        let series = three_hours(["2024-03-11T00:00", "2024-03-11T01:00", "2024-03-11T02:00"]);

        assert_eq!(series.current_index(at(14, 0)), 0);

        let snap = series.snapshot_for(at(14, 0)).unwrap();
        assert_eq!(snap.temperature_c(), 1.5);
        assert_eq!(snap.condition(), WeatherCondition::Clear);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = HourlySeries::new(
            vec!["2024-03-10T00:00".into(), "2024-03-10T01:00".into()],
            vec![Some(1.0), Some(2.0)],
            vec![Some(0), Some(0)],
            vec![Some(50)],
            vec![Some(3.0), None],
        )
        .unwrap_err();

        assert!(matches!(err, WeatherError::MalformedResponse(_)));
        assert!(err.to_string().contains("relativehumidity_2m"));
    }

    #[test]
    fn empty_series_cannot_produce_a_snapshot() {
        let series = HourlySeries::new(vec![], vec![], vec![], vec![], vec![]).unwrap();

        assert!(series.is_empty());
        let err = series.snapshot_for(at(14, 0)).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn null_outside_current_hour_is_ignored() {
        let series = HourlySeries::new(
            vec!["2024-03-10T13:00".into(), "2024-03-10T14:00".into(), "2024-03-10T15:00".into()],
            vec![None, Some(9.4), None],
            vec![None, Some(2), Some(3)],
            vec![Some(70), Some(77), None],
            vec![None, Some(12.3), None],
        )
        .unwrap();

        let snap = series.snapshot_for(at(14, 0)).unwrap();
        assert_eq!(snap, WeatherSnapshot::new(9.4, WeatherCondition::Cloudy, 77, 12.3));
    }

    #[test]
    fn null_at_current_hour_is_rejected() {
        let series = HourlySeries::new(
            vec!["2024-03-10T13:00".into(), "2024-03-10T14:00".into()],
            vec![Some(8.0), Some(9.4)],
            vec![Some(2), None],
            vec![Some(70), Some(77)],
            vec![Some(11.0), Some(12.3)],
        )
        .unwrap();

        let err = series.snapshot_for(at(14, 0)).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
        assert!(err.to_string().contains("weathercode[1]"));
    }
}
