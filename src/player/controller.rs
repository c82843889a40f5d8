//! Playback controller: the user-facing surface of the presentation timer.
//!
//! Combines the duration schedule, the clock and the resolver. The current
//! slide is never stored; it is always resolved from elapsed time.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::player::playback::{resolve, ClockSignal, PlaybackClock, DEFAULT_SUSPEND_THRESHOLD};
use crate::schedule::DurationSchedule;

/// Notifications raised while driving the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The last slide ran out. Raised once per run; leaving the
    /// presentation is the caller's decision.
    Finished,
}

/// Drives one presentation.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    schedule: DurationSchedule,
    clock: PlaybackClock,
    suspend_threshold: Duration,
}

impl PlaybackController {
    pub fn new(schedule: DurationSchedule) -> Self {
        Self::with_suspend_threshold(schedule, DEFAULT_SUSPEND_THRESHOLD)
    }

    pub fn with_suspend_threshold(schedule: DurationSchedule, threshold: Duration) -> Self {
        let clock = PlaybackClock::new(schedule.total()).with_suspend_threshold(threshold);
        Self {
            schedule,
            clock,
            suspend_threshold: threshold,
        }
    }

    pub fn schedule(&self) -> &DurationSchedule {
        &self.schedule
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Active slide, always `resolve(elapsed)`.
    pub fn current_index(&self) -> usize {
        resolve(self.clock.elapsed(), self.schedule.boundaries())
    }

    pub fn slide_count(&self) -> usize {
        self.schedule.len()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn total(&self) -> f64 {
        self.schedule.total()
    }

    pub fn remaining(&self) -> f64 {
        (self.total() - self.elapsed()).max(0.0)
    }

    /// Overall progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            (self.elapsed() / total).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Seconds spent on the current slide.
    pub fn slide_elapsed(&self) -> f64 {
        (self.elapsed() - self.schedule.start_of(self.current_index())).max(0.0)
    }

    /// Seconds left on the current slide.
    pub fn slide_remaining(&self) -> f64 {
        (self.schedule.end_of(self.current_index()) - self.elapsed()).max(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_completed()
    }

    /// Whether the presentation loop should keep producing frames.
    pub fn needs_frames(&self) -> bool {
        self.clock.needs_frames()
    }

    /// Start or resume. Returns false if already playing.
    pub fn play(&mut self, now: Instant) -> bool {
        let changed = self.clock.start(now);
        if changed {
            debug!(elapsed = self.elapsed(), "play");
        }
        changed
    }

    /// Pause. Returns false if already paused.
    pub fn pause(&mut self, now: Instant) -> bool {
        let changed = self.clock.pause(now);
        if changed {
            debug!(elapsed = self.elapsed(), "pause");
        }
        changed
    }

    /// Flip between playing and paused. Returns whether it is now playing.
    pub fn toggle_play(&mut self, now: Instant) -> bool {
        if self.is_playing() || self.is_finished() {
            self.pause(now);
            false
        } else {
            self.play(now);
            true
        }
    }

    /// Advance one slide. No-op on the last slide.
    pub fn next(&mut self, now: Instant) -> bool {
        let index = self.current_index();
        if index >= self.schedule.last_index() {
            return false;
        }
        self.go_to(index + 1, now);
        true
    }

    /// Go back one slide. No-op on the first slide.
    pub fn previous(&mut self, now: Instant) -> bool {
        let index = self.current_index();
        if index == 0 {
            return false;
        }
        self.go_to(index - 1, now);
        true
    }

    /// Jump to the start of slide `index` (clamped). Returns the index used.
    ///
    /// Playback state is kept: a playing show keeps playing and shows the
    /// destination slide for its full duration.
    pub fn go_to(&mut self, index: usize, now: Instant) -> usize {
        let index = index.min(self.schedule.last_index());
        self.clock.seek_to(self.schedule.start_of(index), now);
        debug!(index, elapsed = self.elapsed(), "go to slide");
        index
    }

    /// Restart the show from the first slide and play.
    pub fn reset(&mut self, now: Instant) {
        self.clock.reset();
        self.clock.start(now);
        info!("presentation restarted");
    }

    /// Advance the clock to `now`.
    pub fn tick(&mut self, now: Instant) -> Option<ControllerEvent> {
        match self.clock.tick(now)? {
            ClockSignal::Completed => {
                info!(total = self.total(), "presentation finished");
                Some(ControllerEvent::Finished)
            }
        }
    }

    pub fn suspend(&mut self, now: Instant) {
        self.clock.suspend(now);
    }

    pub fn wake(&mut self, now: Instant) -> Option<Duration> {
        self.clock.wake(now)
    }

    /// Swap in a new schedule. Elapsed resets to zero; a playing show keeps playing.
    pub fn replace_schedule(&mut self, schedule: DurationSchedule, now: Instant) {
        let was_playing = self.is_playing();
        self.clock = PlaybackClock::new(schedule.total()).with_suspend_threshold(self.suspend_threshold);
        self.schedule = schedule;
        if was_playing {
            self.clock.start(now);
        }
    }
}
