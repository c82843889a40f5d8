//! Terminal presentation loop.
//!
//! Owns the terminal while a presentation runs: raw mode, alternate screen
//! and focus-change reporting are acquired by `TerminalGuard` and released
//! in its `Drop`, whichever way the presentation ends. Termination signals
//! are observed through `signal-hook` flags and end the loop cleanly.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableFocusChange, EnableFocusChange, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use signal_hook::SigId;
use tracing::{debug, info, warn};

use super::boundary::{guarded, recovery_choice, Failure, RecoveryChoice};
use super::controller::{ControllerEvent, PlaybackController};
use super::input::{handle_event, InputOptions, InputRouter, DEFAULT_RESET_KEY};
use super::playback::{collect_section_markers, DEFAULT_SUSPEND_THRESHOLD};
use super::render::{draw_presentation, render_recovery, SceneContext};
use super::state::{InputResult, PresentationState};
use crate::deck::{PrepRecord, Slide};
use crate::schedule::DurationSchedule;
use crate::theme::{current_theme, Theme};

/// Poll timeout while no frames are needed. Only used to notice signals.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Default time between frames while playing.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that stop a presentation before it starts.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("Nothing to present: all four sections are empty. Add content with `prep set` or `prep edit` first.")]
    EmptyDeck,
}

/// How the presentation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationOutcome {
    /// The user left the view (Esc, q, Ctrl-C)
    Exited,
    /// A termination signal arrived
    Interrupted,
    /// The presentation failed and the user chose to return to editing
    Failed(String),
}

/// Tunables for one presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentOptions {
    pub frame_interval: Duration,
    pub suspend_threshold: Duration,
    pub freeze_when_unfocused: bool,
    pub reset_key: char,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            suspend_threshold: DEFAULT_SUSPEND_THRESHOLD,
            freeze_when_unfocused: false,
            reset_key: DEFAULT_RESET_KEY,
        }
    }
}

/// Scoped terminal acquisition for the presentation view.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableFocusChange, cursor::Hide) {
            restore_terminal();
            return Err(e.into());
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal();
                return Err(e.into());
            }
        };
        debug!("terminal acquired for presentation");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        debug!("terminal released");
    }
}

fn restore_terminal() {
    let _ = execute!(
        io::stdout(),
        DisableFocusChange,
        LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

/// Termination signal flags, unregistered on drop.
struct SignalFlags {
    terminate: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl SignalFlags {
    fn register() -> io::Result<Self> {
        let terminate = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::new();
        for &signal in signal_hook::consts::TERM_SIGNALS {
            ids.push(signal_hook::flag::register(signal, Arc::clone(&terminate))?);
        }
        #[cfg(unix)]
        ids.push(signal_hook::flag::register(
            signal_hook::consts::SIGHUP,
            Arc::clone(&terminate),
        )?);
        Ok(Self { terminate, ids })
    }

    fn terminate_requested(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }
}

impl Drop for SignalFlags {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Present a record in the terminal until the user leaves.
///
/// Fails only when the record has no content or the terminal cannot be
/// acquired. Failures during the presentation are shown on a recovery
/// screen offering a fresh start or a return to editing.
pub fn present(record: &PrepRecord, options: &PresentOptions) -> Result<PresentationOutcome> {
    if record.is_blank() {
        return Err(PresentError::EmptyDeck.into());
    }

    let slides = Slide::from_record(record);
    let schedule = DurationSchedule::from_durations(&record.durations);
    let markers = collect_section_markers(&schedule, &slides);
    let scene = SceneContext {
        slides: &slides,
        markers: &markers,
        reset_key: options.reset_key,
    };
    let theme = current_theme();

    let signals = SignalFlags::register()?;
    let mut guard = TerminalGuard::acquire()?;
    info!(total = schedule.total(), slides = schedule.len(), "presentation started");

    loop {
        let attempt = guarded(|| {
            run_presentation(guard.terminal(), &scene, &schedule, options, &signals, &theme)
        });
        match attempt {
            Ok(outcome) => {
                info!(?outcome, "presentation ended");
                return Ok(outcome);
            }
            Err(failure) => {
                warn!("showing recovery screen: {}", failure);
                match show_recovery(guard.terminal(), &failure, &signals, &theme)? {
                    RecoveryChoice::Retry => info!("restarting presentation after failure"),
                    RecoveryChoice::ReturnToEdit => {
                        return Ok(PresentationOutcome::Failed(failure.to_string()))
                    }
                }
            }
        }
    }
}

/// One presentation attempt with fresh playback and view state.
fn run_presentation(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    scene: &SceneContext<'_>,
    schedule: &DurationSchedule,
    options: &PresentOptions,
    signals: &SignalFlags,
    theme: &Theme,
) -> Result<PresentationOutcome> {
    let (cols, rows) = terminal::size()?;
    let mut state = PresentationState::new(cols, rows);
    let mut controller =
        PlaybackController::with_suspend_threshold(schedule.clone(), options.suspend_threshold);
    let input = InputOptions {
        router: InputRouter::new(options.reset_key),
        freeze_when_unfocused: options.freeze_when_unfocused,
    };

    terminal.clear()?;
    controller.play(Instant::now());

    loop {
        if signals.terminate_requested() {
            info!("termination signal received");
            return Ok(PresentationOutcome::Interrupted);
        }

        if controller.tick(Instant::now()) == Some(ControllerEvent::Finished) {
            state.show_finished();
        }

        if controller.needs_frames() || state.needs_render {
            terminal.draw(|frame| draw_presentation(frame, &controller, &state, scene, theme))?;
            state.needs_render = false;
        }

        // Frames are only scheduled while the clock runs
        let timeout = if controller.needs_frames() {
            options.frame_interval
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            let event = event::read()?;
            if handle_event(event, &input, &mut state, &mut controller, Instant::now())
                == InputResult::Exit
            {
                return Ok(PresentationOutcome::Exited);
            }
        }
    }
}

fn show_recovery(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    failure: &Failure,
    signals: &SignalFlags,
    theme: &Theme,
) -> Result<RecoveryChoice> {
    let message = failure.to_string();
    terminal.clear()?;

    loop {
        if signals.terminate_requested() {
            return Ok(RecoveryChoice::ReturnToEdit);
        }
        terminal.draw(|frame| render_recovery(frame, &message, theme))?;
        if event::poll(IDLE_POLL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(choice) = recovery_choice(&key) {
                    return Ok(choice);
                }
            }
        }
    }
}
