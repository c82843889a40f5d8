//! Footer line: key hints, the go-to prompt or a status message.

use ratatui::text::{Line, Span};

use crate::player::state::{Focus, PresentationState};
use crate::theme::Theme;

/// Build styled spans for keybinding hints.
///
/// Keys use the accent color, descriptions the secondary text color, and
/// entries are separated by " | ".
pub fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}

/// Footer for the current view state.
pub fn footer_line(
    state: &PresentationState,
    playing: bool,
    reset_key: char,
    theme: &Theme,
) -> Line<'static> {
    if state.focus == Focus::GotoField {
        return Line::from(vec![
            Span::styled("Go to slide: ", theme.accent_style()),
            Span::styled(format!("{}▏", state.goto_input), theme.text_style()),
            Span::styled("  enter: jump | esc: cancel", theme.text_secondary_style()),
        ]);
    }
    if state.finished_banner {
        return Line::from(vec![
            Span::styled("Presentation finished. ", theme.success_style()),
            Span::styled(
                format!("{}: restart | ←: back | esc: exit", reset_key),
                theme.text_secondary_style(),
            ),
        ]);
    }
    if let Some(message) = &state.status_message {
        return Line::from(Span::styled(message.clone(), theme.error_style()));
    }

    let reset = reset_key.to_string();
    let play = if playing { "pause" } else { "play" };
    Line::from(build_footer_spans(
        &[
            ("space", play),
            ("←/→", "slide"),
            (reset.as_str(), "reset"),
            ("g", "go to"),
            ("?", "help"),
            ("esc", "exit"),
        ],
        theme,
    ))
}
