//! Command-line interface parsing and dispatch.

pub mod weather_report;

use std::error::Error;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use crate::cli::weather_report::print_weather_report;
use crate::core::config::Config;
use crate::ui::ansi::AnsiColor;
use crate::ui::chat_loop::{run_chat, ChatOptions};

#[derive(Parser)]
#[command(name = "paterm")]
#[command(about = "A terminal personal-assistant chat with a weather and clock widget")]
#[command(
    long_about = "Paterm is a full-screen terminal chat interface backed by an \
OpenAI-compatible completion API, with a clock and current-weather widget in \
the title line.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY        Chat API key (required for chat)\n\
  OPENAI_BASE_URL       Custom chat API base URL (optional)\n\
  OPENWEATHER_API_KEY   Weather API key (required for the weather widget)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through the transcript\n\
  Ctrl+C            Quit\n\n\
Commands:\n\
  /help             List slash commands\n\
  /weather          Print the current weather report\n\
  /project <name>   Show a project status block\n\
  /log [file]       Log the transcript to a file, or toggle pause"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Log the transcript to the given file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Latitude override for weather lookups
    #[arg(long, global = true, value_name = "LAT")]
    pub lat: Option<f64>,

    /// Longitude override for weather lookups
    #[arg(long, global = true, value_name = "LON")]
    pub lon: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Print the current weather report and exit
    Weather,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            run_chat(ChatOptions {
                model: args.model,
                log_file: args.log,
                latitude: args.lat,
                longitude: args.lon,
            })
            .await
        }
        Commands::Weather => print_weather_report(args.lat, args.lon).await,
        Commands::Set { key, value } => handle_set(&key, &value),
    }
}

fn handle_set(key: &str, value: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match key {
        "default-model" => {
            if value.is_empty() {
                eprintln!("⚠️  Usage: paterm set default-model <model>");
                std::process::exit(1);
            }
            let model = value.join(" ");
            config.default_model = Some(model.clone());
            config.save()?;
            println!("✅ Set default-model to: {model}");
        }
        "username" => {
            if value.is_empty() {
                eprintln!("⚠️  Usage: paterm set username <name>");
                std::process::exit(1);
            }
            let name = value.join(" ");
            config.username = Some(name.clone());
            config.save()?;
            println!("✅ Set username to: {name}");
        }
        "default-color" => {
            let Some(name) = value.first() else {
                eprintln!("⚠️  Usage: paterm set default-color <color>");
                std::process::exit(1);
            };
            let Some(color) = AnsiColor::from_name(name) else {
                eprintln!("❌ Unknown color: {name} (e.g. green, bright-green, cyan)");
                std::process::exit(1);
            };
            config.default_color = Some(color.name().to_string());
            config.save()?;
            println!("✅ Set default-color to: {}", color.name());
        }
        "units" => {
            let Some(units) = value.first() else {
                eprintln!("⚠️  Usage: paterm set units <metric|imperial>");
                std::process::exit(1);
            };
            if units != "metric" && units != "imperial" {
                eprintln!("❌ Units must be 'metric' or 'imperial'");
                std::process::exit(1);
            }
            config.weather.units = units.clone();
            config.save()?;
            println!("✅ Set units to: {units}");
        }
        "location" => {
            let coords: Option<(f64, f64)> = match value {
                [lat, lon] => lat.parse().ok().zip(lon.parse().ok()),
                _ => None,
            };
            let Some((latitude, longitude)) = coords else {
                eprintln!("⚠️  Usage: paterm set location <LAT> <LON>");
                eprintln!("Example: paterm set location 51.5074 -0.1278");
                std::process::exit(1);
            };
            config.weather.latitude = latitude;
            config.weather.longitude = longitude;
            config.save()?;
            println!("✅ Set location to: {latitude}, {longitude}");
        }
        _ => {
            eprintln!("❌ Unknown config key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Route tracing output to a file in the data dir so the TUI stays
/// clean. Off unless RUST_LOG is set.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let Some(dirs) = ProjectDirs::from("org", "paterm", "paterm") else {
        return;
    };
    let log_dir = dirs.data_local_dir();
    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("paterm.log"))
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
