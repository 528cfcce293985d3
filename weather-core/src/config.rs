use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration stored on disk.
///
/// Example TOML (every key is optional):
/// geocoding_url = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// timeout_secs = 30
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Upper bound on each HTTP request. Requests are never retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        for (key, url) in [("geocoding_url", &self.geocoding_url), ("forecast_url", &self.forecast_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("{key} must be an http(s) URL, got '{url}'"));
            }
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("timeout_secs = 5").expect("partial config must parse");

        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            forecast_url: "http://127.0.0.1:8080/v1/forecast".into(),
            timeout_secs: 7,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config { timeout_secs: 0, ..Config::default() };
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn non_http_url_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "geocoding_url = \"ftp://example.com\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("geocoding_url must be an http(s) URL"));
    }
}
