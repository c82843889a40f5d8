//! Progress bar for the presentation view.
//!
//! Shows overall progress with a marker at every section start.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::player::state::MarkerPosition;
use crate::theme::Theme;

const PLAYHEAD: char = '⏺';
const MARKER: char = '◆';
const TRACK: char = '─';

/// Format seconds as MM:SS.
///
/// Fractions are truncated; negative values format as zero.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a countdown as MM:SS, rounding partial seconds up.
///
/// A slide with 0.2 s left still shows `00:01`, so the display reaches
/// `00:00` exactly when the slide ends.
pub fn format_countdown(seconds: f64) -> String {
    format_duration(seconds.max(0.0).ceil())
}

/// Build the progress bar character array.
///
/// Returns the bar and the number of filled positions. The playhead sits at
/// the first unfilled position and wins over a marker at the same spot.
pub fn build_progress_bar_chars(
    bar_width: usize,
    elapsed: f64,
    total: f64,
    markers: &[MarkerPosition],
) -> (Vec<char>, usize) {
    let progress = if total > 0.0 {
        (elapsed / total).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![TRACK; bar_width];

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    for marker in markers {
        let marker_pos = if total > 0.0 {
            ((marker.time / total) * bar_width as f64) as usize
        } else {
            0
        };
        if marker_pos < bar_width && bar[marker_pos] != PLAYHEAD {
            bar[marker_pos] = MARKER;
        }
    }

    (bar, filled)
}

/// Styled progress line: bar followed by `elapsed/total`.
pub fn progress_line(
    width: u16,
    elapsed: f64,
    total: f64,
    markers: &[MarkerPosition],
    theme: &Theme,
) -> Line<'static> {
    let time_display = format!(" {}/{}", format_duration(elapsed), format_duration(total));
    let bar_width = (width as usize).saturating_sub(time_display.width() + 1);
    let (bar, filled) = build_progress_bar_chars(bar_width, elapsed, total, markers);

    let mut spans = Vec::with_capacity(bar_width + 2);
    spans.push(Span::raw(" "));
    for (i, &c) in bar.iter().enumerate() {
        let span = if c == MARKER {
            Span::styled(c.to_string(), theme.highlight_style())
        } else if i < filled {
            Span::styled("━", theme.accent_style())
        } else if i == filled {
            Span::styled(c.to_string(), theme.text_style())
        } else {
            Span::styled(c.to_string(), theme.text_secondary_style())
        };
        spans.push(span);
    }
    spans.push(Span::styled(time_display, theme.text_secondary_style()));
    Line::from(spans)
}
