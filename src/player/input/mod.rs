//! Input handling for the presentation view.
//!
//! Dispatches terminal events: keys go through the `InputRouter`, resizes
//! update the view state and focus changes suspend the clock when the
//! presentation is configured to freeze while unfocused.

mod keyboard;
mod router;

pub use keyboard::{apply_action, handle_key_event};
pub use router::{Action, InputRouter, DEFAULT_RESET_KEY, RESERVED_KEYS};

use std::time::Instant;

use crossterm::event::Event;
use tracing::debug;

use crate::player::controller::PlaybackController;
use crate::player::state::{InputResult, PresentationState};

/// Per-presentation input settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOptions {
    pub router: InputRouter,
    /// Suspend the clock while the terminal window is unfocused
    pub freeze_when_unfocused: bool,
}

/// Handle any terminal event.
pub fn handle_event(
    event: Event,
    options: &InputOptions,
    state: &mut PresentationState,
    controller: &mut PlaybackController,
    now: Instant,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, &options.router, state, controller, now),
        Event::Resize(cols, rows) => {
            state.handle_resize(cols, rows);
            InputResult::Continue
        }
        Event::FocusLost if options.freeze_when_unfocused => {
            debug!("terminal lost focus, suspending clock");
            controller.suspend(now);
            state.needs_render = true;
            InputResult::Continue
        }
        Event::FocusGained if options.freeze_when_unfocused => {
            controller.wake(now);
            state.needs_render = true;
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore mouse and paste events
    }
}
