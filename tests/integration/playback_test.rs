//! Integration tests driving a presentation through the public player API
//!
//! Time is injected as `Instant`s; frames are ticked every 100 ms.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use prepdeck::deck::{SectionDurations, SectionKey, Slide};
use prepdeck::player::input::{handle_event, InputOptions, InputRouter};
use prepdeck::player::playback::collect_section_markers;
use prepdeck::player::render::{draw_presentation, SceneContext};
use prepdeck::player::{ControllerEvent, Focus, InputResult, PlaybackController, PresentationState};
use prepdeck::schedule::DurationSchedule;
use prepdeck::theme::Theme;

use crate::helpers::sample_record;

struct Session {
    t0: Instant,
    now: f64,
    controller: PlaybackController,
    state: PresentationState,
    input: InputOptions,
    finished_events: usize,
}

impl Session {
    fn new(durations: &SectionDurations) -> Self {
        let t0 = Instant::now();
        let mut controller = PlaybackController::new(DurationSchedule::from_durations(durations));
        controller.play(t0);
        Self {
            t0,
            now: 0.0,
            controller,
            state: PresentationState::new(80, 24),
            input: InputOptions::default(),
            finished_events: 0,
        }
    }

    fn instant(&self) -> Instant {
        self.t0 + Duration::from_secs_f64(self.now)
    }

    /// Advance wall time in 100 ms frames.
    fn run_for(&mut self, seconds: f64) {
        let frames = (seconds * 10.0).round() as u32;
        for _ in 0..frames {
            self.now += 0.1;
            if self.controller.tick(self.instant()) == Some(ControllerEvent::Finished) {
                self.finished_events += 1;
                self.state.show_finished();
            }
        }
    }

    fn press(&mut self, code: KeyCode) -> InputResult {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        let now = self.instant();
        handle_event(event, &self.input, &mut self.state, &mut self.controller, now)
    }
}

#[test]
fn uniform_deck_advances_and_completes_once() {
    let mut s = Session::new(&SectionDurations::default());

    s.run_for(14.9);
    assert_eq!(s.controller.current_index(), 0);
    s.run_for(0.2);
    assert_eq!(s.controller.current_index(), 1);
    s.run_for(44.8);
    assert_eq!(s.controller.current_index(), 3);
    s.run_for(5.0);

    assert_eq!(s.controller.elapsed(), 60.0);
    assert_eq!(s.controller.current_index(), 3);
    assert_eq!(s.finished_events, 1);
    assert!(s.state.finished_banner);
    assert!(!s.controller.needs_frames());
}

#[test]
fn goto_third_slide_then_keep_playing() {
    let mut s = Session::new(&SectionDurations::default());
    s.run_for(3.0);

    s.press(KeyCode::Char('g'));
    s.press(KeyCode::Char('3'));
    s.press(KeyCode::Enter);
    assert_eq!(s.controller.current_index(), 2);
    assert!((s.controller.elapsed() - 30.0).abs() < 1e-6);

    s.run_for(1.0);
    assert!((s.controller.elapsed() - 31.0).abs() < 1e-6);
    assert_eq!(s.controller.current_index(), 2);
}

#[test]
fn typing_in_goto_field_never_triggers_shortcuts() {
    let mut s = Session::new(&SectionDurations::default());
    s.run_for(20.0);

    s.press(KeyCode::Char('g'));
    assert_eq!(s.state.focus, Focus::GotoField);
    for key in ['r', ' ', 'q'] {
        assert_eq!(s.press(KeyCode::Char(key)), InputResult::Continue);
    }
    s.press(KeyCode::Right);

    assert_eq!(s.controller.current_index(), 1);
    assert!(s.controller.is_playing());
    assert!((s.controller.elapsed() - 20.0).abs() < 1e-6);

    s.press(KeyCode::Esc);
    assert_eq!(s.state.focus, Focus::View);
    assert_eq!(s.press(KeyCode::Char('q')), InputResult::Exit);
}

#[test]
fn custom_reset_key_restarts_from_first_slide() {
    let mut s = Session::new(&SectionDurations::default());
    s.input.router = InputRouter::new('0');
    s.run_for(35.0);

    s.press(KeyCode::Char('r'));
    assert_eq!(s.controller.current_index(), 2);

    s.press(KeyCode::Char('0'));
    assert_eq!(s.controller.current_index(), 0);
    assert_eq!(s.controller.elapsed(), 0.0);
    assert!(s.controller.is_playing());
}

#[test]
fn pause_holds_time_across_frames() {
    let mut s = Session::new(&SectionDurations::uniform(10));
    s.run_for(5.0);
    s.press(KeyCode::Char(' '));
    s.run_for(3.0);
    assert!((s.controller.elapsed() - 5.0).abs() < 1e-6);

    s.press(KeyCode::Char(' '));
    s.run_for(1.0);
    assert!((s.controller.elapsed() - 6.0).abs() < 1e-6);
}

#[test]
fn frame_renders_current_slide_and_progress() {
    let record = sample_record();
    let slides = Slide::from_record(&record);
    let schedule = DurationSchedule::from_durations(&record.durations);
    let markers = collect_section_markers(&schedule, &slides);
    let scene = SceneContext {
        slides: &slides,
        markers: &markers,
        reset_key: 'r',
    };

    let mut s = Session::new(&record.durations);
    s.run_for(16.0);

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|frame| {
            draw_presentation(frame, &s.controller, &s.state, &scene, &Theme::stage())
        })
        .unwrap();

    let buffer = terminal.backend().buffer().clone();
    let text: String = buffer
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(text.contains(SectionKey::Reason.title()));
    assert!(text.contains("Small batches fail small"));
    assert!(text.contains("2/4"));
}
