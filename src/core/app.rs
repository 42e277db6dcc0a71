//! Interactive session state.
//!
//! Owns the transcript surface, the input line, scroll position, and the
//! single-in-flight-request flag. All mutation happens on the event-loop
//! task; API calls report back over a channel.

use crate::core::message::{banner_lines, decorate, error_notice, greeting, TranscriptRole};
use crate::ui::ansi::{strip_markers, AnsiColor, Transcript};
use crate::utils::logging::LoggingState;

pub struct App {
    pub transcript: Transcript,
    pub input: String,
    pub username: String,
    /// True while a chat request is in flight; sends are refused until
    /// the reply (or error) lands.
    pub waiting: bool,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub logging: LoggingState,
    /// Last fetched temperature for the status line.
    pub temperature: Option<f64>,
}

impl App {
    pub fn new(default_color: AnsiColor, username: String, logging: LoggingState) -> Self {
        App {
            transcript: Transcript::new(default_color),
            input: String::new(),
            username,
            waiting: false,
            scroll_offset: 0,
            auto_scroll: true,
            logging,
            temperature: None,
        }
    }

    /// Banner box plus the assistant's greeting.
    pub fn push_banner(&mut self) {
        for line in banner_lines() {
            self.add_system_message(line);
        }
        let hello = greeting(&self.username);
        self.add_assistant_message(&hello);
    }

    pub fn add_user_message(&mut self, content: &str) {
        let line = decorate(TranscriptRole::User, &self.username, content);
        self.append_line(&line);
    }

    pub fn add_assistant_message(&mut self, content: &str) {
        let line = decorate(TranscriptRole::Assistant, &self.username, content);
        self.append_line(&line);
    }

    pub fn add_system_message(&mut self, content: &str) {
        let line = decorate(TranscriptRole::System, &self.username, content);
        self.append_line(&line);
    }

    pub fn add_error(&mut self, message: &str) {
        let notice = error_notice(message);
        self.add_system_message(&notice);
    }

    fn append_line(&mut self, raw: &str) {
        self.transcript.push_line(raw);
        if self.logging.is_active() {
            if let Err(err) = self.logging.log_line(&strip_markers(raw)) {
                tracing::warn!(error = %err, "transcript logging failed");
            }
        }
    }

    pub fn line_count(&self) -> u16 {
        self.transcript.line_count().min(u16::MAX as usize) as u16
    }

    pub fn max_scroll_offset(&self, available_height: u16) -> u16 {
        self.line_count().saturating_sub(available_height)
    }

    /// Manual scroll toward older lines; disengages auto-scroll.
    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        self.auto_scroll = false;
    }

    /// Manual scroll toward newer lines; re-engages auto-scroll at the
    /// bottom.
    pub fn scroll_down(&mut self, amount: u16, available_height: u16) {
        let max = self.max_scroll_offset(available_height);
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max);
        if self.scroll_offset >= max {
            self.auto_scroll = true;
        }
    }

    /// Pin the viewport to the newest line when auto-scroll is engaged.
    pub fn follow_bottom(&mut self, available_height: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.max_scroll_offset(available_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(
            AnsiColor::BrightGreen,
            "anand".to_string(),
            LoggingState::new(None).unwrap(),
        )
    }

    #[test]
    fn banner_fills_the_opening_screen() {
        let mut app = test_app();
        app.push_banner();
        // Three box lines, one spacer, one greeting
        assert_eq!(app.transcript.line_count(), 5);
        assert!(app
            .transcript
            .plain_text()
            .contains("PERSONAL ASSISTANT TERMINAL"));
        assert!(app.transcript.plain_text().contains("Hi Anand"));
    }

    #[test]
    fn user_messages_render_with_the_prompt() {
        let mut app = test_app();
        app.add_user_message("open project 1");
        assert_eq!(
            app.transcript.plain_text(),
            "anand@paterm:~$ open project 1"
        );
    }

    #[test]
    fn errors_become_tagged_system_lines() {
        let mut app = test_app();
        app.add_error("network error: timed out");
        assert_eq!(
            app.transcript.plain_text(),
            "ERROR: network error: timed out"
        );
    }

    #[test]
    fn manual_scroll_disengages_and_bottom_reengages_auto_scroll() {
        let mut app = test_app();
        for i in 0..30 {
            app.add_system_message(&format!("line {i}"));
        }
        app.follow_bottom(10);
        assert_eq!(app.scroll_offset, 20);

        app.scroll_up(3);
        assert!(!app.auto_scroll);
        assert_eq!(app.scroll_offset, 17);

        app.scroll_down(5, 10);
        assert!(app.auto_scroll);
        assert_eq!(app.scroll_offset, 20);
    }

    #[test]
    fn follow_bottom_is_inert_when_disengaged() {
        let mut app = test_app();
        for i in 0..30 {
            app.add_system_message(&format!("line {i}"));
        }
        app.scroll_up(5);
        let pinned = app.scroll_offset;
        app.add_system_message("new line");
        app.follow_bottom(10);
        assert_eq!(app.scroll_offset, pinned);
    }
}
