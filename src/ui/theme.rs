use ratatui::style::{Color, Modifier, Style};

use crate::ui::ansi::AnsiColor;

/// Map a palette tag to the concrete color used on screen.
///
/// Values follow the classic xterm foreground palette; the bright-green
/// entry doubles as the surface's default text color.
pub fn terminal_color(tag: AnsiColor) -> Color {
    match tag {
        AnsiColor::Black => Color::Rgb(0x00, 0x00, 0x00),
        AnsiColor::Red => Color::Rgb(0xcd, 0x00, 0x00),
        AnsiColor::Green => Color::Rgb(0x00, 0xcd, 0x00),
        AnsiColor::Yellow => Color::Rgb(0xcd, 0xcd, 0x00),
        AnsiColor::Blue => Color::Rgb(0x00, 0x00, 0xee),
        AnsiColor::Magenta => Color::Rgb(0xcd, 0x00, 0xcd),
        AnsiColor::Cyan => Color::Rgb(0x00, 0xcd, 0xcd),
        AnsiColor::White => Color::Rgb(0xe5, 0xe5, 0xe5),
        AnsiColor::BrightBlack => Color::Rgb(0x7f, 0x7f, 0x7f),
        AnsiColor::BrightRed => Color::Rgb(0xff, 0x00, 0x00),
        AnsiColor::BrightGreen => Color::Rgb(0x00, 0xff, 0x00),
        AnsiColor::BrightYellow => Color::Rgb(0xff, 0xff, 0x00),
        AnsiColor::BrightBlue => Color::Rgb(0x5c, 0x5c, 0xff),
        AnsiColor::BrightMagenta => Color::Rgb(0xff, 0x00, 0xff),
        AnsiColor::BrightCyan => Color::Rgb(0x00, 0xff, 0xff),
        AnsiColor::BrightWhite => Color::Rgb(0xff, 0xff, 0xff),
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chrome
    pub title_style: Style,
    pub status_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    // Input area
    pub input_text_style: Style,
}

impl Theme {
    pub fn terminal_dark() -> Self {
        Theme {
            background_color: Color::Rgb(0x1e, 0x1e, 0x1e),
            title_style: Style::default()
                .fg(terminal_color(AnsiColor::BrightGreen))
                .add_modifier(Modifier::BOLD),
            status_style: Style::default().fg(terminal_color(AnsiColor::White)),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(terminal_color(AnsiColor::BrightGreen)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal_dark()
    }
}
