//! Color-span rendering for the fake terminal surface.
//!
//! Transcript lines carry embedded SGR color markers (`ESC [ <code> m`).
//! Instead of handing those to the real terminal, [`render`] scans each
//! line once and produces [`Segment`]s tagged with the color in effect, so
//! the chat area can be drawn as ordinary styled spans.
//!
//! The scanner is deliberately forgiving: only the sixteen foreground
//! codes (and reset) are consumed. Anything else, including
//! multi-parameter sequences, unknown codes, and markers missing their
//! trailing `m`, is left in the output as ordinary text.

use memchr::memchr;

const ESC: u8 = 0x1b;

/// The sixteen-color palette recognized in transcript markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Parse a configuration color name (e.g. `"bright-green"`).
    pub fn from_name(name: &str) -> Option<AnsiColor> {
        match name.trim().to_ascii_lowercase().as_str() {
            "black" => Some(AnsiColor::Black),
            "red" => Some(AnsiColor::Red),
            "green" => Some(AnsiColor::Green),
            "yellow" => Some(AnsiColor::Yellow),
            "blue" => Some(AnsiColor::Blue),
            "magenta" => Some(AnsiColor::Magenta),
            "cyan" => Some(AnsiColor::Cyan),
            "white" => Some(AnsiColor::White),
            "bright-black" | "gray" | "grey" => Some(AnsiColor::BrightBlack),
            "bright-red" => Some(AnsiColor::BrightRed),
            "bright-green" => Some(AnsiColor::BrightGreen),
            "bright-yellow" => Some(AnsiColor::BrightYellow),
            "bright-blue" => Some(AnsiColor::BrightBlue),
            "bright-magenta" => Some(AnsiColor::BrightMagenta),
            "bright-cyan" => Some(AnsiColor::BrightCyan),
            "bright-white" => Some(AnsiColor::BrightWhite),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnsiColor::Black => "black",
            AnsiColor::Red => "red",
            AnsiColor::Green => "green",
            AnsiColor::Yellow => "yellow",
            AnsiColor::Blue => "blue",
            AnsiColor::Magenta => "magenta",
            AnsiColor::Cyan => "cyan",
            AnsiColor::White => "white",
            AnsiColor::BrightBlack => "bright-black",
            AnsiColor::BrightRed => "bright-red",
            AnsiColor::BrightGreen => "bright-green",
            AnsiColor::BrightYellow => "bright-yellow",
            AnsiColor::BrightBlue => "bright-blue",
            AnsiColor::BrightMagenta => "bright-magenta",
            AnsiColor::BrightCyan => "bright-cyan",
            AnsiColor::BrightWhite => "bright-white",
        }
    }
}

/// A contiguous run of characters sharing one resolved display color.
///
/// Segments are created during a single render pass and never mutated;
/// the owning [`Transcript`] replaces them wholesale on re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: AnsiColor,
}

impl Segment {
    fn new(text: impl Into<String>, color: AnsiColor) -> Self {
        Segment {
            text: text.into(),
            color,
        }
    }
}

/// A recognized SGR code between `[` and `m`.
enum SgrCode {
    Reset,
    Set(AnsiColor),
}

fn parse_sgr(code: &[u8]) -> Option<SgrCode> {
    match code {
        b"0" => Some(SgrCode::Reset),
        b"30" => Some(SgrCode::Set(AnsiColor::Black)),
        b"31" => Some(SgrCode::Set(AnsiColor::Red)),
        b"32" => Some(SgrCode::Set(AnsiColor::Green)),
        b"33" => Some(SgrCode::Set(AnsiColor::Yellow)),
        b"34" => Some(SgrCode::Set(AnsiColor::Blue)),
        b"35" => Some(SgrCode::Set(AnsiColor::Magenta)),
        b"36" => Some(SgrCode::Set(AnsiColor::Cyan)),
        b"37" => Some(SgrCode::Set(AnsiColor::White)),
        b"90" => Some(SgrCode::Set(AnsiColor::BrightBlack)),
        b"91" => Some(SgrCode::Set(AnsiColor::BrightRed)),
        b"92" => Some(SgrCode::Set(AnsiColor::BrightGreen)),
        b"93" => Some(SgrCode::Set(AnsiColor::BrightYellow)),
        b"94" => Some(SgrCode::Set(AnsiColor::BrightBlue)),
        b"95" => Some(SgrCode::Set(AnsiColor::BrightMagenta)),
        b"96" => Some(SgrCode::Set(AnsiColor::BrightCyan)),
        b"97" => Some(SgrCode::Set(AnsiColor::BrightWhite)),
        _ => None,
    }
}

/// Try to consume a recognized marker at `pos`.
///
/// Returns the code and the index just past the terminating `m`. `None`
/// means there is nothing to consume here: no `ESC [` pair, no `m` before
/// the end of input, or a code outside the palette. All three cases fall
/// through to plain-text handling.
fn parse_marker(bytes: &[u8], pos: usize) -> Option<(SgrCode, usize)> {
    if bytes[pos] != ESC || pos + 1 >= bytes.len() || bytes[pos + 1] != b'[' {
        return None;
    }
    let m = memchr(b'm', &bytes[pos + 2..])?;
    let code = parse_sgr(&bytes[pos + 2..pos + 2 + m])?;
    Some((code, pos + 2 + m + 1))
}

/// Find the first `ESC [` pair at or after `from`, or the end of input.
///
/// A lone trailing `ESC` does not start a marker and stays in the run.
fn next_marker_start(bytes: &[u8], from: usize) -> usize {
    let mut search = from;
    while let Some(offset) = memchr(ESC, &bytes[search..]) {
        let at = search + offset;
        if at + 1 < bytes.len() && bytes[at + 1] == b'[' {
            return at;
        }
        search = at + 1;
    }
    bytes.len()
}

/// Convert a string with embedded color markers into styled segments.
///
/// A single left-to-right scan with no backtracking. Recognized markers
/// update the current color and are stripped; everything else is emitted
/// as text tagged with the color in effect. The reset code (`0`) restores
/// `default_color`, not a neutral state. Never fails.
///
/// Concatenating the `text` of the returned segments reproduces the input
/// with every recognized marker removed and every unrecognized marker left
/// intact.
pub fn render(text: &str, default_color: AnsiColor) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut current = default_color;
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some((code, after)) = parse_marker(bytes, pos) {
            current = match code {
                SgrCode::Reset => default_color,
                SgrCode::Set(color) => color,
            };
            pos = after;
            continue;
        }

        // Maximal plain run: everything up to the next ESC [ pair. The
        // run starts at pos even when pos itself is a rejected marker,
        // so unknown sequences survive verbatim in the output.
        let run_end = next_marker_start(bytes, pos + 1);
        segments.push(Segment::new(&text[pos..run_end], current));
        pos = run_end;
    }

    segments
}

/// Strip every recognized marker from `text`, keeping unrecognized ones.
pub fn strip_markers(text: &str) -> String {
    render(text, AnsiColor::White)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

/// One display line of the transcript.
pub type RenderedLine = Vec<Segment>;

/// Append-only display surface backing the chat area.
///
/// Each appended string is rendered exactly once; prior lines are never
/// re-scanned. Embedded newlines split the result into display lines, with
/// the color state carrying across the split (one input, one scan pass).
#[derive(Debug, Clone)]
pub struct Transcript {
    default_color: AnsiColor,
    lines: Vec<RenderedLine>,
}

impl Transcript {
    pub fn new(default_color: AnsiColor) -> Self {
        Transcript {
            default_color,
            lines: Vec::new(),
        }
    }

    pub fn default_color(&self) -> AnsiColor {
        self.default_color
    }

    /// Render `raw` and append the resulting display line(s).
    pub fn push_line(&mut self, raw: &str) {
        let mut line: RenderedLine = Vec::new();
        for segment in render(raw, self.default_color) {
            let mut rest = segment.text.as_str();
            while let Some(newline) = rest.find('\n') {
                if newline > 0 {
                    line.push(Segment::new(&rest[..newline], segment.color));
                }
                self.lines.push(std::mem::take(&mut line));
                rest = &rest[newline + 1..];
            }
            if !rest.is_empty() {
                line.push(Segment::new(rest, segment.color));
            }
        }
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-joined, marker-stripped transcript text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for segment in line {
                out.push_str(&segment.text);
            }
        }
        out
    }
}
