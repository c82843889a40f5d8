//! Recovery screen shown after the presentation failed.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

pub fn recovery_lines(message: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled(
            "The presentation stopped unexpectedly.",
            theme.error_style(),
        )),
        Line::default(),
        Line::from(Span::styled(message.to_string(), theme.text_secondary_style())),
        Line::default(),
        Line::from(vec![
            Span::styled("r", theme.accent_bold_style()),
            Span::styled(": start over   ", theme.text_style()),
            Span::styled("e/esc", theme.accent_bold_style()),
            Span::styled(": back to editing", theme.text_style()),
        ]),
    ]
}

pub fn render_recovery(frame: &mut Frame, message: &str, theme: &Theme) {
    let area = frame.area();
    let width = area.width.min(72);
    let height = area.height.min(10);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let body = Paragraph::new(recovery_lines(message, theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error_style()),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(body, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_lines_include_message_and_choices() {
        let lines = recovery_lines("boom", &Theme::default());
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|t| t == "boom"));
        assert!(text.iter().any(|t| t.contains("start over") && t.contains("back to editing")));
    }
}
