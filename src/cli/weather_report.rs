//! One-shot weather report for the `weather` subcommand.

use std::error::Error;

use chrono::Local;

use crate::core::config::{self, Config};
use crate::core::net::build_client;
use crate::core::weather::{WeatherClient, DEFAULT_WEATHER_BASE_URL};

pub async fn print_weather_report(
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let api_key = config::weather_api_key()
        .ok_or("OPENWEATHER_API_KEY environment variable not set")?;

    let client = WeatherClient::new(
        build_client()?,
        DEFAULT_WEATHER_BASE_URL,
        api_key,
        config.weather.units.clone(),
    );
    let latitude = lat.unwrap_or(config.weather.latitude);
    let longitude = lon.unwrap_or(config.weather.longitude);

    let report = client.current(latitude, longitude).await?;

    let now = Local::now();
    println!("{}", now.format("%A, %B %d, %Y"));
    println!("{}", now.format("%H:%M:%S"));
    println!();
    for line in report.summary_lines() {
        println!("{line}");
    }
    Ok(())
}
