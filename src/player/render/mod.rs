//! Rendering components for the presentation view.
//!
//! Screen layout, top to bottom: header (state, position, timers), slide
//! body, progress bar with section markers, footer (hints or prompt). The
//! help overlay and recovery screen draw over everything.

mod footer;
mod help;
mod progress;
mod recovery;
mod slide;
mod status;

pub use footer::{build_footer_spans, footer_line};
pub use help::{help_area, help_entries, help_lines, render_help, HELP_BOX_WIDTH};
pub use progress::{build_progress_bar_chars, format_countdown, format_duration, progress_line};
pub use recovery::{recovery_lines, render_recovery};
pub use slide::{markdown_lines, render_slide};
pub use status::{header_line, state_icon, HeaderInfo};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::deck::Slide;
use crate::player::controller::PlaybackController;
use crate::player::state::{MarkerPosition, PresentationState};
use crate::theme::Theme;

/// Static inputs of one presentation.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub slides: &'a [Slide],
    pub markers: &'a [MarkerPosition],
    pub reset_key: char,
}

/// Draw one frame of the presentation view.
pub fn draw_presentation(
    frame: &mut Frame,
    controller: &PlaybackController,
    state: &PresentationState,
    scene: &SceneContext<'_>,
    theme: &Theme,
) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let index = controller.current_index();
    let slide = scene.slides.get(index);

    let header = HeaderInfo {
        index,
        count: controller.slide_count(),
        title: slide.map(|s| s.title).unwrap_or_default(),
        elapsed: controller.elapsed(),
        remaining: controller.remaining(),
        slide_remaining: controller.slide_remaining(),
        playing: controller.is_playing(),
        finished: controller.is_finished(),
    };
    frame.render_widget(
        Paragraph::new(header_line(&header, area.width, theme)),
        rows[0],
    );

    if let Some(slide) = slide {
        render_slide(frame, rows[2], slide, theme);
    }

    frame.render_widget(
        Paragraph::new(progress_line(
            area.width,
            controller.elapsed(),
            controller.total(),
            scene.markers,
            theme,
        )),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(footer_line(
            state,
            controller.is_playing(),
            scene.reset_key,
            theme,
        )),
        rows[4],
    );

    if state.show_help {
        render_help(frame, scene.reset_key, theme);
    }
}
