use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use weather_core::{Config, WeatherSnapshot, current_hour_key, service_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a place name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions for a location.
    Show {
        /// Place name; may span several words, e.g. `weather show New York`.
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,

        /// Print the snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactively set endpoints and request timeout.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { location, json } => show(&location.join(" "), json).await,
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(location: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(?config, "loaded configuration");
    let service = service_from_config(&config)?;

    let now = Local::now().naive_local();
    let snapshot = service
        .lookup_at(location, now)
        .await
        .with_context(|| format!("Could not get weather for '{location}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{location} ({})", current_hour_key(now));
        print!("{}", render(&snapshot));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()?;
    config.forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_url)
        .prompt()?;
    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Text layout of a snapshot: temperature, condition, humidity, wind.
fn render(snapshot: &WeatherSnapshot) -> String {
    let condition = snapshot.condition();
    let icon = condition.icon_name().map(|i| format!(" [{i}]")).unwrap_or_default();

    format!(
        "{} C\n{}{}\nHumidity {}%\nWindspeed {}km/h\n",
        snapshot.temperature_c(),
        condition,
        icon,
        snapshot.humidity_pct(),
        snapshot.wind_speed_kmh(),
    )
}
