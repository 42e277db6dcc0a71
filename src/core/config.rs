//! Configuration loading and saving.
//!
//! Settings live in a TOML file under the platform config directory. A
//! missing file means defaults; a malformed file is a real error with the
//! offending path in the message. Saves go through a temp file in the
//! target directory so a crash never leaves a half-written config.
//!
//! API keys are not configuration: they come from the environment only.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::core::chat::{DEFAULT_CHAT_BASE_URL, DEFAULT_MODEL};
use crate::core::message::DEFAULT_USERNAME;
use crate::ui::ansi::AnsiColor;

/// Coordinates used until the user configures their own.
pub const DEFAULT_LATITUDE: f64 = 28.41;
pub const DEFAULT_LONGITUDE: f64 = 77.04;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherSettings {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherSettings {
    fn default() -> Self {
        WeatherSettings {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            units: default_units(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Model used for chat completions
    pub default_model: Option<String>,
    /// Chat API base URL override (env OPENAI_BASE_URL wins)
    pub base_url: Option<String>,
    /// Name shown in the shell prompt
    pub username: Option<String>,
    /// Palette color for undecorated transcript text (e.g. "bright-green")
    pub default_color: Option<String>,
    #[serde(default)]
    pub weather: WeatherSettings,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn StdError>> {
        self.save_to_path(&Self::config_path())
    }

    pub(crate) fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError> { Box::new(err) })?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("org", "paterm", "paterm") {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            None => PathBuf::from("paterm.toml"),
        }
    }

    pub fn model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Chat base URL: environment override, then config, then the default.
    pub fn chat_base_url(&self) -> String {
        std::env::var("OPENAI_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_CHAT_BASE_URL.to_string())
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    /// Default transcript color; unknown names fall back to bright green.
    pub fn default_color(&self) -> AnsiColor {
        self.default_color
            .as_deref()
            .and_then(AnsiColor::from_name)
            .unwrap_or(AnsiColor::BrightGreen)
    }
}

/// Errors from reading configuration off disk.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Chat API key, required before the TUI takes over the terminal.
pub fn chat_api_key() -> Result<String, String> {
    std::env::var("OPENAI_API_KEY").map_err(|_| {
        "OPENAI_API_KEY environment variable not set\n\n\
         Please set your API key:\n\
         export OPENAI_API_KEY=\"your-api-key-here\"\n\n\
         Optionally, you can also set a custom base URL:\n\
         export OPENAI_BASE_URL=\"https://api.openai.com/v1\""
            .to_string()
    })
}

/// Weather API key; the weather widget stays blank without one.
pub fn weather_api_key() -> Option<String> {
    std::env::var("OPENWEATHER_API_KEY").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.username(), DEFAULT_USERNAME);
        assert_eq!(config.default_color(), AnsiColor::BrightGreen);
        assert!((config.weather.latitude - DEFAULT_LATITUDE).abs() < f64::EPSILON);
        assert_eq!(config.weather.units, "metric");
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.default_model = Some("gpt-4o-mini".to_string());
        config.username = Some("kiran".to_string());
        config.default_color = Some("bright-cyan".to_string());
        config.weather.latitude = 51.5074;
        config.weather.longitude = -0.1278;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.model(), "gpt-4o-mini");
        assert_eq!(loaded.username(), "kiran");
        assert_eq!(loaded.default_color(), AnsiColor::BrightCyan);
        assert!((loaded.weather.longitude + 0.1278).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_weather_table_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[weather]\nunits = \"imperial\"\n").unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.weather.units, "imperial");
        assert!((loaded.weather.latitude - DEFAULT_LATITUDE).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_toml_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_model = [not toml").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn unknown_color_name_falls_back_to_bright_green() {
        let mut config = Config::default();
        config.default_color = Some("ultraviolet".to_string());
        assert_eq!(config.default_color(), AnsiColor::BrightGreen);
    }
}
