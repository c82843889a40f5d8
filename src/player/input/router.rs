//! Key to action mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::Focus;

/// Default key that restarts the presentation.
pub const DEFAULT_RESET_KEY: char = 'r';

/// Character keys with a fixed binding; none of them can be the reset key.
pub const RESERVED_KEYS: [char; 4] = [' ', 'q', '?', 'g'];

/// Presentation actions a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    Previous,
    Next,
    Reset,
    First,
    Last,
    ToggleHelp,
    OpenGoto,
    Exit,
}

/// Maps key presses to actions while the slide view has focus.
#[derive(Debug, Clone, Copy)]
pub struct InputRouter {
    reset_key: char,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_KEY)
    }
}

impl InputRouter {
    /// Create a router. The reset key matches both cases; a reserved key
    /// falls back to `DEFAULT_RESET_KEY`.
    pub fn new(reset_key: char) -> Self {
        let reset_key = reset_key.to_ascii_lowercase();
        Self {
            reset_key: if Self::is_reserved(reset_key) {
                DEFAULT_RESET_KEY
            } else {
                reset_key
            },
        }
    }

    pub fn reset_key(&self) -> char {
        self.reset_key
    }

    /// Whether `c` already triggers another action.
    pub fn is_reserved(c: char) -> bool {
        RESERVED_KEYS.contains(&c.to_ascii_lowercase())
    }

    /// Map a key to an action.
    ///
    /// Returns `None` for unbound keys, key releases and every key that
    /// arrives while a text field has focus.
    pub fn route(&self, key: &KeyEvent, focus: Focus) -> Option<Action> {
        if focus != Focus::View || key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Exit)
            }
            KeyCode::Char(c) if c.to_ascii_lowercase() == self.reset_key => Some(Action::Reset),
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Left => Some(Action::Previous),
            KeyCode::Right => Some(Action::Next),
            KeyCode::Home => Some(Action::First),
            KeyCode::End => Some(Action::Last),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Exit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('g') => Some(Action::OpenGoto),
            _ => None,
        }
    }
}
