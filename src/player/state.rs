//! Presentation view state
//!
//! Contains `PresentationState`, everything the presentation screen shows
//! besides the timer itself, plus shared types used across player modules.
//! Timing lives in the `PlaybackController`; nothing here is time-dependent.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// presentation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep presenting
    Continue,
    /// Leave the presentation view
    Exit,
}

/// Marker information for the progress bar.
///
/// One marker per section start after the first.
#[derive(Debug, Clone)]
pub struct MarkerPosition {
    /// Offset in seconds where the section starts
    pub time: f64,
    /// Section title
    pub label: String,
}

/// Which element receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The slide view; keys are routed to playback actions
    #[default]
    View,
    /// The go-to-slide text field; keys edit the field
    GotoField,
}

/// Maximum number of digits accepted by the go-to field.
pub const GOTO_MAX_DIGITS: usize = 3;

/// View state for the presentation screen.
#[derive(Debug)]
pub struct PresentationState {
    // === UI modes ===
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Current key target
    pub focus: Focus,
    /// Digits typed into the go-to field (1-based slide number)
    pub goto_input: String,

    // === Notifications ===
    /// Shown after the last slide ran out, until the next navigation
    pub finished_banner: bool,
    /// One-line message for the footer (e.g. "No slide 9")
    pub status_message: Option<String>,

    // === Terminal ===
    pub term_cols: u16,
    pub term_rows: u16,

    // === Rendering flags ===
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl PresentationState {
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            focus: Focus::View,
            goto_input: String::new(),
            finished_banner: false,
            status_message: None,
            term_cols,
            term_rows,
            needs_render: true,
        }
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        self.needs_render = true;
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Focus the go-to field with an empty buffer.
    pub fn open_goto(&mut self) {
        self.focus = Focus::GotoField;
        self.goto_input.clear();
        self.status_message = None;
        self.needs_render = true;
    }

    /// Return focus to the view, discarding the field contents.
    pub fn close_goto(&mut self) {
        self.focus = Focus::View;
        self.goto_input.clear();
        self.needs_render = true;
    }

    /// Append a digit to the go-to field. Other characters are ignored.
    pub fn push_goto_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.goto_input.len() < GOTO_MAX_DIGITS {
            self.goto_input.push(c);
            self.needs_render = true;
        }
    }

    pub fn pop_goto_char(&mut self) {
        if self.goto_input.pop().is_some() {
            self.needs_render = true;
        }
    }

    /// Close the go-to field and return the zero-based slide it names.
    ///
    /// Returns `None` (and sets a status message) when the field is empty
    /// or the number is outside `1..=slide_count`.
    pub fn submit_goto(&mut self, slide_count: usize) -> Option<usize> {
        let input = std::mem::take(&mut self.goto_input);
        self.close_goto();
        match input.parse::<usize>() {
            Ok(n) if (1..=slide_count).contains(&n) => Some(n - 1),
            Ok(n) => {
                self.set_status(format!("No slide {} (1-{})", n, slide_count));
                None
            }
            Err(_) => None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.needs_render = true;
    }

    pub fn show_finished(&mut self) {
        self.finished_banner = true;
        self.needs_render = true;
    }

    /// Clear transient notifications after a navigation.
    pub fn clear_notices(&mut self) {
        if self.finished_banner || self.status_message.is_some() {
            self.finished_banner = false;
            self.status_message = None;
            self.needs_render = true;
        }
    }
}
