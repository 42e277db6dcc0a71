//! Transcript roles and the terminal-style line decoration.
//!
//! Every line shown in the chat area is first decorated with the color
//! markers below, then rendered by [`crate::ui::ansi::render`]. The
//! decoration mirrors a shell session: a cyan `user@host` prompt for the
//! user, a green `assistant>` prompt for replies, plain yellow for
//! app-authored notices.

pub const HOST_NAME: &str = "paterm";
pub const DEFAULT_USERNAME: &str = "anand";

/// Bright-yellow notice shown while a chat request is in flight.
pub const PROCESSING_NOTICE: &str = "\x1b[93mProcessing request...\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptRole {
    User,
    Assistant,
    System,
}

impl TranscriptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
            TranscriptRole::System => "system",
        }
    }

    /// Role string sent on the wire; system notices never leave the app.
    pub fn to_api_role(self) -> Option<&'static str> {
        match self {
            TranscriptRole::User => Some("user"),
            TranscriptRole::Assistant => Some("assistant"),
            TranscriptRole::System => None,
        }
    }
}

/// Decorate one message for the transcript.
///
/// System messages carry no prompt prefix; they are wrapped in yellow
/// whole. Any markers already present in `content` (e.g. the ERROR
/// prefix) override the wrapper where they appear.
pub fn decorate(role: TranscriptRole, username: &str, content: &str) -> String {
    match role {
        TranscriptRole::User => format!(
            "\x1b[36m{username}@{HOST_NAME}\x1b[0m:\x1b[94m~\x1b[0m$ \x1b[97m{content}\x1b[0m"
        ),
        TranscriptRole::Assistant => {
            format!("\x1b[32massistant\x1b[0m> \x1b[92m{content}\x1b[0m")
        }
        TranscriptRole::System => format!("\x1b[33m{content}\x1b[0m"),
    }
}

/// Decorate a failure as a system notice with a bright-red `ERROR:` tag.
pub fn error_notice(message: &str) -> String {
    format!("\x1b[91mERROR:\x1b[0m {message}")
}

/// The fixed banner printed when the session opens.
pub fn banner_lines() -> [&'static str; 4] {
    [
        "╔════════════════════════════════════════╗",
        "║   PERSONAL ASSISTANT TERMINAL v1.0    ║",
        "╚════════════════════════════════════════╝",
        "",
    ]
}

/// Opening greeting from the assistant.
pub fn greeting(username: &str) -> String {
    let mut name = username.to_string();
    if let Some(first) = name.get(..1) {
        let upper = first.to_uppercase();
        name.replace_range(..1, &upper);
    }
    format!("Hi {name}, how can I help you?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ansi::{render, AnsiColor};

    #[test]
    fn user_lines_carry_the_shell_prompt() {
        let line = decorate(TranscriptRole::User, "anand", "ls");
        let segments = render(&line, AnsiColor::BrightGreen);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "anand@paterm:~$ ls");
        assert_eq!(segments[0].color, AnsiColor::Cyan);
        assert_eq!(segments.last().unwrap().color, AnsiColor::BrightWhite);
    }

    #[test]
    fn assistant_lines_use_the_green_prompt() {
        let line = decorate(TranscriptRole::Assistant, "anand", "hello");
        let segments = render(&line, AnsiColor::BrightGreen);
        assert_eq!(segments[0].text, "assistant");
        assert_eq!(segments[0].color, AnsiColor::Green);
        assert_eq!(segments.last().unwrap().text, "hello");
        assert_eq!(segments.last().unwrap().color, AnsiColor::BrightGreen);
    }

    #[test]
    fn system_lines_are_plain_yellow_without_prefix() {
        let line = decorate(TranscriptRole::System, "anand", "logging enabled");
        let segments = render(&line, AnsiColor::BrightGreen);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "logging enabled");
        assert_eq!(segments[0].color, AnsiColor::Yellow);
    }

    #[test]
    fn error_notices_paint_the_tag_bright_red() {
        let line = decorate(
            TranscriptRole::System,
            "anand",
            &error_notice("API quota exceeded (HTTP 429) - try again later"),
        );
        let segments = render(&line, AnsiColor::BrightGreen);
        assert_eq!(segments[0].text, "ERROR:");
        assert_eq!(segments[0].color, AnsiColor::BrightRed);
        // After the reset the message returns to the surface default, not
        // to the yellow wrapper. Scan state has no stack to pop.
        assert_eq!(segments[1].color, AnsiColor::BrightGreen);
    }

    #[test]
    fn greeting_capitalizes_the_username() {
        assert_eq!(greeting("anand"), "Hi Anand, how can I help you?");
        assert_eq!(greeting("Mo"), "Hi Mo, how can I help you?");
    }

    #[test]
    fn system_role_never_reaches_the_wire() {
        assert_eq!(TranscriptRole::System.to_api_role(), None);
        assert_eq!(TranscriptRole::User.to_api_role(), Some("user"));
        assert_eq!(TranscriptRole::Assistant.to_api_role(), Some("assistant"));
    }
}
