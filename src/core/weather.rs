//! Current-weather client and the flattened report the UI displays.

use tracing::debug;

use crate::api::weather::WeatherResponse;
use crate::core::net::ApiError;
use crate::utils::url::endpoint_url;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Everything the weather view shows, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// "City, CC"
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    /// Condition text with each word title-cased ("Light Rain").
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    /// "°C" for metric, "°F" for imperial.
    pub temperature_unit: &'static str,
}

impl WeatherReport {
    /// The box-drawn block printed into the transcript and by the
    /// one-shot CLI command.
    pub fn summary_lines(&self) -> Vec<String> {
        let unit = self.temperature_unit;
        vec![
            format!("┌─ Weather: {}", self.location),
            format!("├─ {}", self.description),
            format!(
                "├─ Temperature: {}{unit} (feels like {}{unit})",
                self.temperature, self.feels_like
            ),
            format!("├─ Humidity: {}%", self.humidity),
            format!("└─ Wind: {} m/s", self.wind_speed),
        ]
    }
}

#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl WeatherClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        WeatherClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            units: units.into(),
        }
    }

    /// Fetch current conditions for a coordinate pair.
    pub async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, ApiError> {
        let url = endpoint_url(&self.base_url, "weather");
        debug!(latitude, longitude, units = %self.units, "fetching current weather");

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.clone()),
            ])
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        debug!(status = %status, "weather response");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ApiError::from_status(status, body));
        }

        let parsed: WeatherResponse = response.json().await.map_err(ApiError::Transport)?;
        Ok(flatten_report(parsed, &self.units))
    }
}

fn flatten_report(response: WeatherResponse, units: &str) -> WeatherReport {
    WeatherReport {
        location: format!("{}, {}", response.name, response.sys.country),
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        description: response
            .weather
            .first()
            .map(|condition| title_case_words(&condition.description))
            .unwrap_or_else(|| "N/A".to_string()),
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
        temperature_unit: if units.eq_ignore_ascii_case("imperial") {
            "°F"
        } else {
            "°C"
        },
    }
}

/// Lowercase each word, then uppercase its first character.
fn title_case_words(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
