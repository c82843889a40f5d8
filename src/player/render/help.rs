//! Help overlay for the presentation view.
//!
//! A centered box listing every key binding.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: u16 = 44;

/// Key and description pairs shown in the overlay, grouped by heading.
pub fn help_entries(reset_key: char) -> Vec<(&'static str, Vec<(String, &'static str)>)> {
    vec![
        (
            "Playback",
            vec![
                ("Space".to_string(), "Play / Pause"),
                (
                    format!("{}/{}", reset_key, reset_key.to_ascii_uppercase()),
                    "Restart from slide 1",
                ),
            ],
        ),
        (
            "Slides",
            vec![
                ("<-/->".to_string(), "Previous / next slide"),
                ("Home/End".to_string(), "First / last slide"),
                ("g".to_string(), "Go to slide number"),
            ],
        ),
        (
            "General",
            vec![
                ("?".to_string(), "Show this help"),
                ("Esc/q".to_string(), "Back to editing"),
            ],
        ),
    ]
}

/// Help overlay text lines.
pub fn help_lines(reset_key: char, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for (heading, entries) in help_entries(reset_key) {
        lines.push(Line::from(Span::styled(
            format!(" {}", heading),
            theme.accent_bold_style(),
        )));
        for (key, desc) in entries {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<10}", key), theme.accent_style()),
                Span::styled(desc, theme.text_style()),
            ]));
        }
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "       Press any key to close",
        theme.text_secondary_style(),
    )));
    lines
}

/// Centered rectangle for the help box, clipped to `area`.
pub fn help_area(area: Rect, line_count: u16) -> Rect {
    let width = HELP_BOX_WIDTH.min(area.width);
    let height = (line_count + 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the help overlay on top of the current frame.
pub fn render_help(frame: &mut Frame, reset_key: char, theme: &Theme) {
    let lines = help_lines(reset_key, theme);
    let area = help_area(frame.area(), lines.len() as u16);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style())
            .title(Span::styled(" prepdeck help ", theme.accent_bold_style())),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}
