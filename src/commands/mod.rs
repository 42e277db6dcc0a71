//! Slash-command parsing and execution.
//!
//! Input starting with `/` is handled locally and never reaches the chat
//! API. Everything else passes through as a message.

use crate::core::app::App;

pub enum CommandResult {
    /// Command handled; nothing further to do.
    Continue,
    /// Not a command: send as a chat message.
    ProcessAsMessage(String),
    /// `/weather`: the loop owns the async fetch.
    FetchWeather,
    /// `/quit`
    Quit,
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "/help" => {
            show_help(app);
            CommandResult::Continue
        }
        "/weather" => CommandResult::FetchWeather,
        "/project" => {
            if args.is_empty() {
                app.add_system_message("Usage: /project <name>");
            } else {
                show_project_status(app, &args.join(" "));
            }
            CommandResult::Continue
        }
        "/log" => {
            handle_log(app, &args);
            CommandResult::Continue
        }
        "/quit" | "/exit" => CommandResult::Quit,
        other => {
            app.add_system_message(&format!("Unknown command: {other} (try /help)"));
            CommandResult::Continue
        }
    }
}

fn show_help(app: &mut App) {
    for line in [
        "Commands:",
        "  /help              Show this help",
        "  /weather           Fetch the current weather report",
        "  /project <name>    Show a project status block",
        "  /log [file]        Log the transcript to a file, or toggle pause",
        "  /quit              Leave the session",
        "",
        "Keys: Enter sends, Up/Down/mouse scroll, Ctrl+C quits",
    ] {
        app.add_system_message(line);
    }
    let logging = format!("Logging: {}", app.logging.status());
    app.add_system_message(&logging);
}

fn show_project_status(app: &mut App, name: &str) {
    for line in [
        format!("┌─ Executing: {name}"),
        "├─ Status: Initializing...".to_string(),
        "├─ Interface: Command-line UI (v1.0)".to_string(),
        "└─ Note: Full interface implementation coming soon".to_string(),
        String::new(),
    ] {
        app.add_system_message(&line);
    }
}

fn handle_log(app: &mut App, args: &[&str]) {
    match args {
        [] => match app.logging.toggle() {
            Ok(message) => app.add_system_message(&message),
            Err(err) => app.add_system_message(&format!("Error: {err}")),
        },
        [filename] => match app.logging.set_log_file(filename.to_string()) {
            Ok(message) => app.add_system_message(&message),
            Err(err) => app.add_system_message(&format!("Error setting log file: {err}")),
        },
        _ => app.add_system_message(
            "Usage: /log [filename] - Enable logging to file, or /log to toggle pause/resume",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ansi::AnsiColor;
    use crate::utils::logging::LoggingState;

    fn test_app() -> App {
        App::new(
            AnsiColor::BrightGreen,
            "anand".to_string(),
            LoggingState::new(None).unwrap(),
        )
    }

    #[test]
    fn plain_text_passes_through_as_a_message() {
        let mut app = test_app();
        match process_input(&mut app, "  hello there  ") {
            CommandResult::ProcessAsMessage(message) => assert_eq!(message, "hello there"),
            _ => panic!("expected passthrough"),
        }
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn weather_command_defers_to_the_loop() {
        let mut app = test_app();
        assert!(matches!(
            process_input(&mut app, "/weather"),
            CommandResult::FetchWeather
        ));
    }

    #[test]
    fn project_command_prints_the_status_block() {
        let mut app = test_app();
        process_input(&mut app, "/project Project 1");
        let text = app.transcript.plain_text();
        assert!(text.contains("┌─ Executing: Project 1"));
        assert!(text.contains("└─ Note: Full interface implementation coming soon"));
        assert_eq!(app.transcript.line_count(), 5);
    }

    #[test]
    fn project_without_a_name_shows_usage() {
        let mut app = test_app();
        process_input(&mut app, "/project");
        assert!(app.transcript.plain_text().contains("Usage: /project"));
    }

    #[test]
    fn log_toggle_without_a_file_reports_the_problem() {
        let mut app = test_app();
        process_input(&mut app, "/log");
        assert!(app.transcript.plain_text().contains("No log file specified"));
    }

    #[test]
    fn unknown_commands_are_reported_not_sent() {
        let mut app = test_app();
        match process_input(&mut app, "/frobnicate") {
            CommandResult::Continue => {}
            _ => panic!("unknown command must not reach the API"),
        }
        assert!(app.transcript.plain_text().contains("Unknown command"));
    }

    #[test]
    fn quit_variants_end_the_session() {
        let mut app = test_app();
        assert!(matches!(
            process_input(&mut app, "/quit"),
            CommandResult::Quit
        ));
        assert!(matches!(
            process_input(&mut app, "/exit"),
            CommandResult::Quit
        ));
    }
}
