//! The interactive event loop.
//!
//! Drawing, key handling, and API dispatch all run on one task. Chat and
//! weather requests are spawned one-shot onto the runtime and report back
//! over an unbounded channel; at most one chat request is in flight.

use std::error::Error;
use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::core::chat::{user_turn, ChatClient};
use crate::core::config::{self, Config};
use crate::core::message::PROCESSING_NOTICE;
use crate::core::net::{build_client, ApiError};
use crate::core::weather::{WeatherClient, WeatherReport, DEFAULT_WEATHER_BASE_URL};
use crate::ui::renderer::{draw, transcript_height};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

enum ApiEvent {
    ChatReply(Result<String, ApiError>),
    Weather {
        result: Result<WeatherReport, ApiError>,
        /// Print the full report into the transcript (vs. status only).
        announce: bool,
    },
}

pub struct ChatOptions {
    pub model: Option<String>,
    pub log_file: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let api_key = config::chat_api_key()?;
    let http = build_client()?;

    let model = options
        .model
        .unwrap_or_else(|| config.model().to_string());
    let chat = ChatClient::new(http.clone(), config.chat_base_url(), api_key, model);
    let weather = config::weather_api_key().map(|key| {
        WeatherClient::new(
            http,
            DEFAULT_WEATHER_BASE_URL,
            key,
            config.weather.units.clone(),
        )
    });
    let latitude = options.latitude.unwrap_or(config.weather.latitude);
    let longitude = options.longitude.unwrap_or(config.weather.longitude);

    let logging = LoggingState::new(options.log_file)?;
    let mut app = App::new(config.default_color(), config.username().to_string(), logging);
    app.push_banner();

    let theme = Theme::terminal_dark();
    let (tx, mut rx) = mpsc::unbounded_channel::<ApiEvent>();

    // Seed the status-line temperature; failures here stay off-screen.
    if let Some(client) = weather.clone() {
        spawn_weather_fetch(client, latitude, longitude, tx.clone(), false);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = loop {
        let available_height = transcript_height(terminal.size()?.height);
        app.follow_bottom(available_height);
        terminal.draw(|frame| draw(frame, &app, &theme))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        let input = app.input.trim().to_string();
                        if input.is_empty() {
                            continue;
                        }
                        app.input.clear();
                        match process_input(&mut app, &input) {
                            CommandResult::Continue => {}
                            CommandResult::Quit => break Ok(()),
                            CommandResult::FetchWeather => match &weather {
                                Some(client) => spawn_weather_fetch(
                                    client.clone(),
                                    latitude,
                                    longitude,
                                    tx.clone(),
                                    true,
                                ),
                                None => app.add_error(
                                    "OPENWEATHER_API_KEY environment variable not set",
                                ),
                            },
                            CommandResult::ProcessAsMessage(message) => {
                                if app.waiting {
                                    app.add_system_message(
                                        "Still processing the previous request...",
                                    );
                                } else {
                                    send_chat_message(&mut app, &chat, &tx, message);
                                }
                            }
                        }
                    }
                    KeyCode::Char(c) => app.input.push(c),
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => app.scroll_up(1),
                    KeyCode::Down => app.scroll_down(1, available_height),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(3),
                    MouseEventKind::ScrollDown => app.scroll_down(3, available_height),
                    _ => {}
                },
                _ => {}
            }
        }

        while let Ok(api_event) = rx.try_recv() {
            handle_api_event(&mut app, api_event);
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn send_chat_message(
    app: &mut App,
    chat: &ChatClient,
    tx: &mpsc::UnboundedSender<ApiEvent>,
    message: String,
) {
    app.add_user_message(&message);
    app.add_system_message(PROCESSING_NOTICE);
    app.waiting = true;

    let client = chat.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.send(user_turn(message)).await;
        let _ = tx.send(ApiEvent::ChatReply(result));
    });
}

fn spawn_weather_fetch(
    client: WeatherClient,
    latitude: f64,
    longitude: f64,
    tx: mpsc::UnboundedSender<ApiEvent>,
    announce: bool,
) {
    tokio::spawn(async move {
        let result = client.current(latitude, longitude).await;
        let _ = tx.send(ApiEvent::Weather { result, announce });
    });
}

fn handle_api_event(app: &mut App, api_event: ApiEvent) {
    match api_event {
        ApiEvent::ChatReply(Ok(content)) => {
            app.waiting = false;
            app.add_assistant_message(&content);
        }
        ApiEvent::ChatReply(Err(err)) => {
            app.waiting = false;
            app.add_error(&err.to_string());
        }
        ApiEvent::Weather {
            result: Ok(report),
            announce,
        } => {
            app.temperature = Some(report.temperature);
            if announce {
                let now = Local::now();
                app.add_system_message(&format!(
                    "{} {}",
                    now.format("%A, %B %d, %Y"),
                    now.format("%H:%M:%S")
                ));
                for line in report.summary_lines() {
                    app.add_system_message(&line);
                }
                app.add_system_message("");
            }
        }
        ApiEvent::Weather {
            result: Err(err),
            announce,
        } => {
            if announce {
                app.add_error(&format!("Error loading weather: {err}"));
            } else {
                tracing::warn!(error = %err, "startup weather fetch failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ansi::AnsiColor;

    fn test_app() -> App {
        App::new(
            AnsiColor::BrightGreen,
            "anand".to_string(),
            LoggingState::new(None).unwrap(),
        )
    }

    #[test]
    fn chat_reply_clears_the_waiting_flag() {
        let mut app = test_app();
        app.waiting = true;
        handle_api_event(&mut app, ApiEvent::ChatReply(Ok("hello".to_string())));
        assert!(!app.waiting);
        assert!(app.transcript.plain_text().contains("assistant> hello"));
    }

    #[test]
    fn chat_errors_surface_as_error_notices() {
        let mut app = test_app();
        app.waiting = true;
        handle_api_event(
            &mut app,
            ApiEvent::ChatReply(Err(ApiError::QuotaExceeded)),
        );
        assert!(!app.waiting);
        let text = app.transcript.plain_text();
        assert!(text.contains("ERROR:"));
        assert!(text.contains("quota exceeded"));
    }

    #[test]
    fn silent_weather_updates_only_the_status_temperature() {
        let mut app = test_app();
        let report = WeatherReport {
            location: "London, GB".to_string(),
            temperature: 9.3,
            feels_like: 7.5,
            description: "Light Rain".to_string(),
            humidity: 81,
            wind_speed: 4.1,
            temperature_unit: "°C",
        };
        handle_api_event(
            &mut app,
            ApiEvent::Weather {
                result: Ok(report),
                announce: false,
            },
        );
        assert_eq!(app.temperature, Some(9.3));
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn announced_weather_prints_the_report_block() {
        let mut app = test_app();
        let report = WeatherReport {
            location: "Gurugram, IN".to_string(),
            temperature: 31.4,
            feels_like: 35.2,
            description: "Haze".to_string(),
            humidity: 62,
            wind_speed: 2.6,
            temperature_unit: "°C",
        };
        handle_api_event(
            &mut app,
            ApiEvent::Weather {
                result: Ok(report),
                announce: true,
            },
        );
        let text = app.transcript.plain_text();
        assert!(text.contains("┌─ Weather: Gurugram, IN"));
        assert!(text.contains("├─ Humidity: 62%"));
        // date line + five report lines + trailing spacer
        assert_eq!(app.transcript.line_count(), 7);
    }

    #[test]
    fn silent_weather_failure_leaves_the_transcript_alone() {
        let mut app = test_app();
        handle_api_event(
            &mut app,
            ApiEvent::Weather {
                result: Err(ApiError::InvalidCredentials),
                announce: false,
            },
        );
        assert!(app.transcript.is_empty());
        assert_eq!(app.temperature, None);
    }
}
