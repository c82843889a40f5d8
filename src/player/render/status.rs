//! Header bar for the presentation view.
//!
//! Displays play state, slide position, section title and the timers.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::progress::{format_countdown, format_duration};
use crate::theme::Theme;

/// Snapshot of what the header shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderInfo<'a> {
    pub index: usize,
    pub count: usize,
    pub title: &'a str,
    pub elapsed: f64,
    pub remaining: f64,
    pub slide_remaining: f64,
    pub playing: bool,
    pub finished: bool,
}

/// Play state icon. ▶ means "press space to play".
pub fn state_icon(playing: bool, finished: bool) -> &'static str {
    if finished {
        "■"
    } else if playing {
        "⏸"
    } else {
        "▶"
    }
}

/// Build the header line, padded to `width`.
pub fn header_line(info: &HeaderInfo<'_>, width: u16, theme: &Theme) -> Line<'static> {
    let left = vec![
        Span::styled(
            format!(" {} ", state_icon(info.playing, info.finished)),
            theme.text_style(),
        ),
        Span::styled(
            format!("{}/{} ", info.index + 1, info.count),
            theme.accent_bold_style(),
        ),
        Span::styled(info.title.to_string(), theme.text_style()),
    ];
    let right_text = format!(
        "slide {}  {}  left {} ",
        format_countdown(info.slide_remaining),
        format_duration(info.elapsed),
        format_countdown(info.remaining),
    );

    let left_width: usize = left.iter().map(|s| s.width()).sum();
    let padding = (width as usize).saturating_sub(left_width + right_text.width());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, theme.text_secondary_style()));
    Line::from(spans)
}
