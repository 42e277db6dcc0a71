//! Frame construction: transcript area, title/status line, input box.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::ui::theme::{terminal_color, Theme};

const INPUT_HEIGHT: u16 = 3;
const TITLE_HEIGHT: u16 = 1;

/// Transcript rows available at a given terminal height; the event loop
/// uses the same figure for scroll clamping.
pub fn transcript_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(INPUT_HEIGHT + TITLE_HEIGHT)
}

/// Status text for the title line: wall-clock time, plus the temperature
/// once a fetch has landed. The reading is truncated to whole degrees.
pub fn format_status(now: DateTime<Local>, temperature: Option<f64>) -> String {
    match temperature {
        Some(degrees) => format!("{} | {}°C", now.format("%H:%M"), degrees as i32),
        None => now.format("%H:%M").to_string(),
    }
}

/// Map the transcript's styled segments onto ratatui lines.
pub fn build_display_lines(app: &App) -> Vec<Line<'_>> {
    app.transcript
        .lines()
        .iter()
        .map(|line| {
            Line::from(
                line.iter()
                    .map(|segment| {
                        Span::styled(
                            segment.text.as_str(),
                            Style::default().fg(terminal_color(segment.color)),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(frame.area());

    // Title on the left, clock/temperature on the right.
    let title = "paterm";
    let status = format_status(Local::now(), app.temperature);
    let gap = (chunks[0].width as usize)
        .saturating_sub(title.width())
        .saturating_sub(status.width());
    let header = Line::from(vec![
        Span::styled(title, theme.title_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(status, theme.status_style),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let lines = build_display_lines(app);
    let available_height = chunks[1].height;
    let max_offset = (lines.len() as u16).saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll_offset, 0)),
        chunks[1],
    );

    let input_title = if app.waiting {
        "Waiting for reply... (Ctrl+C to quit)"
    } else {
        "Type your message (Enter to send, Ctrl+C to quit)"
    };
    let input = Paragraph::new(app.input.as_str())
        .style(theme.input_text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled(input_title, theme.input_title_style)),
        );
    frame.render_widget(input, chunks[2]);

    let cursor_x = chunks[2].x + 1 + app.input.width() as u16;
    frame.set_cursor_position((
        cursor_x.min(chunks[2].right().saturating_sub(2)),
        chunks[2].y + 1,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ansi::AnsiColor;
    use crate::utils::logging::LoggingState;
    use chrono::TimeZone;

    #[test]
    fn status_shows_time_only_until_weather_arrives() {
        let noon = Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap();
        assert_eq!(format_status(noon, None), "12:05");
    }

    #[test]
    fn status_appends_truncated_temperature() {
        let noon = Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap();
        assert_eq!(format_status(noon, Some(23.9)), "12:05 | 23°C");
        assert_eq!(format_status(noon, Some(-0.4)), "12:05 | 0°C");
    }

    #[test]
    fn display_lines_carry_segment_colors() {
        let mut app = App::new(
            AnsiColor::BrightGreen,
            "anand".to_string(),
            LoggingState::new(None).unwrap(),
        );
        app.add_user_message("ls");

        let lines = build_display_lines(&app);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "anand@paterm");
        assert_eq!(
            spans[0].style.fg,
            Some(terminal_color(AnsiColor::Cyan))
        );
        assert_eq!(spans.last().unwrap().content, "ls");
        assert_eq!(
            spans.last().unwrap().style.fg,
            Some(terminal_color(AnsiColor::BrightWhite))
        );
    }

    #[test]
    fn transcript_height_accounts_for_chrome() {
        assert_eq!(transcript_height(24), 20);
        assert_eq!(transcript_height(3), 0);
    }
}
