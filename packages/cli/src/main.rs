#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the ward air-quality pipeline.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ward_aqi_pollution::{
    forecast, process_pollution_data,
    standards::{self, DEFAULT_STANDARDS_ID},
};
use ward_aqi_pollution_models::{HourOfDay, RawReading};
use ward_aqi_waqi::WaqiClient;

#[derive(Parser)]
#[command(name = "ward_aqi", about = "Ward-level air quality inference")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline on a raw reading JSON file
    Process {
        /// Path to the reading, or `-` for stdin
        input: PathBuf,
        /// Local hour (0-23) for source inference. Defaults to now.
        #[arg(long)]
        hour: Option<u8>,
        /// Standards set id
        #[arg(long, default_value = DEFAULT_STANDARDS_ID)]
        standards: String,
    },
    /// Fetch the live WAQI feed for a location and run the pipeline on it
    Fetch {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Ward or locality name used to look up a named station
        #[arg(long)]
        keyword: Option<String>,
        /// Local hour (0-23) for source inference. Defaults to now.
        #[arg(long)]
        hour: Option<u8>,
        /// Standards set id
        #[arg(long, default_value = DEFAULT_STANDARDS_ID)]
        standards: String,
    },
    /// List the embedded standards sets
    Standards,
    /// Print the EPA-interpolated AQI for a forecast day
    ForecastAqi {
        /// Average PM2.5, µg/m³
        #[arg(long)]
        pm25: f64,
        /// Average PM10, µg/m³
        #[arg(long)]
        pm10: f64,
    },
}

fn resolve_hour(hour: Option<u8>) -> Result<HourOfDay, Box<dyn std::error::Error>> {
    Ok(match hour {
        Some(value) => HourOfDay::from_value(value)?,
        None => HourOfDay::from_time(&chrono::Local::now()),
    })
}

fn read_reading(input: &Path) -> Result<RawReading, Box<dyn std::error::Error>> {
    let contents = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&contents)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            hour,
            standards,
        } => {
            let standards = standards::standards_by_id(&standards)?;
            let hour = resolve_hour(hour)?;
            let raw = read_reading(&input)?;

            log::info!("Processing {} at {hour}", input.display());
            let result = process_pollution_data(&raw, &standards, hour);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Fetch {
            lat,
            lon,
            keyword,
            hour,
            standards,
        } => {
            let standards = standards::standards_by_id(&standards)?;
            let hour = resolve_hour(hour)?;
            let client = WaqiClient::from_env()?;

            let feed = client.fetch_feed(lat, lon, keyword.as_deref()).await?;
            log::info!("Station {} (idx {})", feed.city.name, feed.idx);

            let raw = feed.raw_reading(chrono::Utc::now());
            let result = process_pollution_data(&raw, &standards, hour);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Standards => {
            println!("{:<10} {:>8} {:>8} {:>8} {:>8}  NAME", "ID", "PM2.5", "PM10", "NO2", "SO2");
            println!("{}", "-".repeat(70));
            for set in standards::all_standards() {
                println!(
                    "{:<10} {:>8} {:>8} {:>8} {:>8}  {}",
                    set.id,
                    set.thresholds.pm25,
                    set.thresholds.pm10,
                    set.thresholds.no2,
                    set.thresholds.so2,
                    set.name
                );
            }
        }
        Commands::ForecastAqi { pm25, pm10 } => {
            println!("{}", forecast::forecast_day_aqi(pm25, pm10));
        }
    }

    Ok(())
}
