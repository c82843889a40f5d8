//! Failure boundary for the presentation view.
//!
//! Runs one presentation attempt and turns both returned errors and panics
//! into a `Failure` the caller can show on a recovery screen. The panic hook
//! is replaced for the duration of the attempt so a panic message is logged
//! instead of being printed over the alternate screen.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::error;

/// Why a presentation attempt ended abnormally.
#[derive(Debug)]
pub enum Failure {
    /// The attempt returned an error
    Error(anyhow::Error),
    /// The attempt panicked; holds the panic message
    Panic(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Error(e) => write!(f, "{:#}", e),
            Failure::Panic(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

/// What the user picked on the recovery screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryChoice {
    /// Start a fresh presentation
    Retry,
    /// Leave the presentation view
    ReturnToEdit,
}

/// Run `attempt`, catching errors and panics.
pub fn guarded<T, F>(attempt: F) -> Result<T, Failure>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        error!("presentation panicked: {}", info);
    }));
    let outcome = panic::catch_unwind(AssertUnwindSafe(attempt));
    panic::set_hook(previous_hook);

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!("presentation failed: {:#}", e);
            Err(Failure::Error(e))
        }
        Err(payload) => Err(Failure::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Map a key on the recovery screen to a choice.
pub fn recovery_choice(key: &KeyEvent) -> Option<RecoveryChoice> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(RecoveryChoice::Retry),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(RecoveryChoice::ReturnToEdit)
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('q') | KeyCode::Esc => {
            Some(RecoveryChoice::ReturnToEdit)
        }
        _ => None,
    }
}
