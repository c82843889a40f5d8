//! Keyboard input handling for the presentation view.
//!
//! Closes the help overlay, feeds the go-to field while it has focus and
//! otherwise applies the router's action to the controller.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::router::{Action, InputRouter};
use crate::player::controller::PlaybackController;
use crate::player::state::{Focus, InputResult, PresentationState};

/// Handle a keyboard event.
pub fn handle_key_event(
    key: KeyEvent,
    router: &InputRouter,
    state: &mut PresentationState,
    controller: &mut PlaybackController,
    now: Instant,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    if state.focus == Focus::GotoField {
        handle_goto_key(key, state, controller, now);
        return InputResult::Continue;
    }

    // If help is showing, any key closes it
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    match router.route(&key, state.focus) {
        Some(action) => apply_action(action, state, controller, now),
        None => InputResult::Continue,
    }
}

/// Apply one action. Navigation clears the finished banner.
pub fn apply_action(
    action: Action,
    state: &mut PresentationState,
    controller: &mut PlaybackController,
    now: Instant,
) -> InputResult {
    match action {
        Action::Exit => return InputResult::Exit,
        Action::ToggleHelp => state.toggle_help(),
        Action::OpenGoto => state.open_goto(),
        Action::TogglePlay => {
            controller.toggle_play(now);
        }
        Action::Previous => {
            if controller.previous(now) {
                state.clear_notices();
            }
        }
        Action::Next => {
            if controller.next(now) {
                state.clear_notices();
            }
        }
        Action::First => {
            controller.go_to(0, now);
            state.clear_notices();
        }
        Action::Last => {
            controller.go_to(controller.slide_count().saturating_sub(1), now);
            state.clear_notices();
        }
        Action::Reset => {
            controller.reset(now);
            state.clear_notices();
        }
    }
    state.needs_render = true;
    InputResult::Continue
}

fn handle_goto_key(
    key: KeyEvent,
    state: &mut PresentationState,
    controller: &mut PlaybackController,
    now: Instant,
) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => state.close_goto(),
        KeyCode::Esc => state.close_goto(),
        KeyCode::Enter => {
            if let Some(index) = state.submit_goto(controller.slide_count()) {
                controller.go_to(index, now);
                state.clear_notices();
            }
        }
        KeyCode::Backspace => state.pop_goto_char(),
        KeyCode::Char(c) => state.push_goto_char(c),
        _ => {}
    }
}
