//! Slide body rendering.
//!
//! Section text is rendered as light Markdown: `#` headings, `-`/`*`/`+`
//! bullets, `>` quotes, `**bold**` and `` `code` `` spans. Everything else is
//! plain wrapped text. Slides with the bottom layout split the area and show
//! the reference link panel below the text.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::deck::{Slide, SlideLayout};
use crate::theme::Theme;

/// Render one slide into `area`.
pub fn render_slide(frame: &mut Frame, area: Rect, slide: &Slide, theme: &Theme) {
    let (body_area, link_area) = match slide.layout {
        SlideLayout::Default => (area, None),
        SlideLayout::Bottom => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            (parts[0], Some(parts[1]))
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(slide.title, theme.accent_bold_style())),
        Line::from(Span::styled(slide.key.subtitle(), theme.text_secondary_style())),
        Line::default(),
    ];
    if slide.is_blank() {
        lines.push(Line::from(Span::styled(
            "(empty section)",
            theme.text_secondary_style().add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(markdown_lines(&slide.content, theme));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(body, padded(body_area));

    if let Some(link_area) = link_area {
        render_link_panel(frame, link_area, slide.reference_link.as_deref(), theme);
    }
}

fn render_link_panel(frame: &mut Frame, area: Rect, link: Option<&str>, theme: &Theme) {
    let lines = match link {
        Some(url) => vec![Line::from(Span::styled(
            url.to_string(),
            theme.highlight_style().add_modifier(Modifier::UNDERLINED),
        ))],
        None => vec![
            Line::from(Span::styled("No reference link set", theme.text_style())),
            Line::from(Span::styled(
                "Add one with `prep link <url>`",
                theme.text_secondary_style(),
            )),
        ],
    };
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.text_secondary_style())
                .title(Span::styled(" Reference link ", theme.text_style())),
        );
    frame.render_widget(panel, padded(area));
}

/// Inset an area by two columns on each side.
fn padded(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        width: area.width.saturating_sub(4),
        ..area
    }
}

/// Convert section text into styled lines.
pub fn markdown_lines(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    content
        .lines()
        .map(|raw| {
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if let Some(heading) = heading_text(trimmed) {
                return Line::from(inline_spans(heading, theme.accent_bold_style(), theme));
            }
            if let Some(item) = ["- ", "* ", "+ "]
                .iter()
                .find_map(|marker| trimmed.strip_prefix(marker))
            {
                let indent = line.len() - trimmed.len();
                let mut spans = vec![Span::styled(
                    format!("{}• ", " ".repeat(indent)),
                    theme.accent_style(),
                )];
                spans.extend(inline_spans(item, theme.text_style(), theme));
                return Line::from(spans);
            }
            if let Some(quote) = trimmed.strip_prefix('>') {
                let mut spans = vec![Span::styled("│ ", theme.text_secondary_style())];
                spans.extend(inline_spans(
                    quote.trim_start(),
                    theme.text_secondary_style().add_modifier(Modifier::ITALIC),
                    theme,
                ));
                return Line::from(spans);
            }
            Line::from(inline_spans(line, theme.text_style(), theme))
        })
        .collect()
}

/// Text of an ATX heading (`#` to `######` followed by a space).
fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        line[hashes..].strip_prefix(' ').map(str::trim)
    } else {
        None
    }
}

/// Split a line into spans, styling `**bold**` and `` `code` `` runs.
///
/// An opening delimiter without a closing one is kept as literal text.
fn inline_spans(text: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let bold = rest.find("**").map(|pos| (pos, "**"));
        let code = rest.find('`').map(|pos| (pos, "`"));
        let next = match (bold, code) {
            (Some(b), Some(c)) => Some(if b.0 <= c.0 { b } else { c }),
            (b, c) => b.or(c),
        };

        let Some((start, delim)) = next else {
            spans.push(Span::styled(rest.to_string(), base));
            break;
        };
        let inner_start = start + delim.len();
        let Some(len) = rest[inner_start..].find(delim) else {
            spans.push(Span::styled(rest.to_string(), base));
            break;
        };

        if start > 0 {
            spans.push(Span::styled(rest[..start].to_string(), base));
        }
        let inner = &rest[inner_start..inner_start + len];
        let style = if delim == "**" {
            base.add_modifier(Modifier::BOLD)
        } else {
            theme.highlight_style()
        };
        spans.push(Span::styled(inner.to_string(), style));
        rest = &rest[inner_start + len + delim.len()..];
    }

    spans
}
