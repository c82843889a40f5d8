//! Anchor-based playback clock.
//!
//! Elapsed time is never accumulated tick by tick. While running it is always
//! recomputed as `offset + (now - anchor)`, so timer granularity and missed
//! frames cannot introduce drift. Pausing folds the current value into
//! `offset`; resuming and seeking move the anchor to "now".
//!
//! All operations take the current `Instant` explicitly, which keeps the clock
//! deterministic under test.
//!
//! # Suspension
//!
//! When the process is not being scheduled (terminal unfocused with
//! `freeze_when_unfocused`, laptop asleep, `SIGSTOP`), the clock behaves as if
//! paused: the anchor is shifted forward by the gap on wake. Gaps are measured
//! from the last instant the clock observed, and that instant is moved forward
//! every time a gap is absorbed, so no interval is ever compensated twice.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default frame gap treated as an unsignalled suspension.
pub const DEFAULT_SUSPEND_THRESHOLD: Duration = Duration::from_secs(1);

/// Elapsed seconds for a running clock anchored at `anchor` with `offset`.
pub fn elapsed_from(anchor: Instant, offset: f64, now: Instant) -> f64 {
    offset + now.saturating_duration_since(anchor).as_secs_f64()
}

/// Lifecycle phase of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Not started, elapsed is zero
    Idle,
    /// Advancing with wall-clock time
    Running,
    /// Frozen at the pause point
    Paused,
    /// Reached the end while running; no more frames are needed
    Completed,
}

/// Signals raised by `PlaybackClock::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Elapsed reached the total for the first time in this run
    Completed,
}

/// Drift-free elapsed time tracker for one presentation.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    phase: ClockPhase,
    total: f64,
    /// Elapsed value at `anchor` (or the frozen value when not running)
    offset: f64,
    anchor: Option<Instant>,
    /// Last computed elapsed value
    elapsed: f64,
    /// Last instant the running clock observed
    last_seen: Option<Instant>,
    suspended_since: Option<Instant>,
    suspend_threshold: Duration,
    completion_signalled: bool,
}

impl PlaybackClock {
    pub fn new(total: f64) -> Self {
        Self {
            phase: ClockPhase::Idle,
            total: total.max(0.0),
            offset: 0.0,
            anchor: None,
            elapsed: 0.0,
            last_seen: None,
            suspended_since: None,
            suspend_threshold: DEFAULT_SUSPEND_THRESHOLD,
            completion_signalled: false,
        }
    }

    /// Set the frame gap above which a tick is treated as a resume from suspension.
    pub fn with_suspend_threshold(mut self, threshold: Duration) -> Self {
        self.suspend_threshold = threshold;
        self
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Elapsed seconds as of the last operation.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    pub fn is_completed(&self) -> bool {
        self.phase == ClockPhase::Completed
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_since.is_some()
    }

    /// Whether the caller should keep scheduling frames.
    pub fn needs_frames(&self) -> bool {
        self.is_running() && !self.is_suspended()
    }

    /// Elapsed seconds at `now`, without changing state.
    pub fn read(&self, now: Instant) -> f64 {
        match (self.phase, self.anchor) {
            (ClockPhase::Running, Some(anchor)) => {
                let at = self.suspended_since.unwrap_or(now);
                elapsed_from(anchor, self.offset, at).clamp(0.0, self.total)
            }
            _ => self.elapsed,
        }
    }

    /// Start or resume. Returns false if already running or completed.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.phase {
            ClockPhase::Idle | ClockPhase::Paused => {
                self.offset = self.elapsed;
                self.anchor = Some(now);
                self.last_seen = Some(now);
                self.suspended_since = None;
                self.phase = ClockPhase::Running;
                true
            }
            ClockPhase::Running | ClockPhase::Completed => false,
        }
    }

    /// Pause, freezing elapsed. Returns false if there was nothing to pause.
    pub fn pause(&mut self, now: Instant) -> bool {
        match self.phase {
            ClockPhase::Running | ClockPhase::Completed => {
                self.elapsed = self.read(now);
                self.offset = self.elapsed;
                self.anchor = None;
                self.last_seen = None;
                self.suspended_since = None;
                self.phase = ClockPhase::Paused;
                true
            }
            ClockPhase::Idle | ClockPhase::Paused => false,
        }
    }

    /// Back to idle at zero. Completion may be signalled again afterwards.
    pub fn reset(&mut self) {
        self.phase = ClockPhase::Idle;
        self.offset = 0.0;
        self.anchor = None;
        self.elapsed = 0.0;
        self.last_seen = None;
        self.suspended_since = None;
        self.completion_signalled = false;
    }

    /// Advance to `now`. Called once per frame while running.
    ///
    /// Returns `Some(ClockSignal::Completed)` exactly once per run, on the
    /// tick where elapsed reaches the total.
    pub fn tick(&mut self, now: Instant) -> Option<ClockSignal> {
        if self.phase != ClockPhase::Running {
            return None;
        }
        if self.suspended_since.is_some() {
            self.elapsed = self.read(now);
            return None;
        }

        if let (Some(last), Some(anchor)) = (self.last_seen, self.anchor) {
            let gap = now.saturating_duration_since(last);
            if gap > self.suspend_threshold {
                debug!(gap_ms = gap.as_millis() as u64, "absorbing frame gap");
                self.anchor = Some(anchor + gap);
            }
        }
        self.last_seen = Some(now);

        self.elapsed = self.read(now);
        if self.elapsed >= self.total {
            self.elapsed = self.total;
            self.offset = self.total;
            self.anchor = None;
            self.last_seen = None;
            self.phase = ClockPhase::Completed;
            if !self.completion_signalled {
                self.completion_signalled = true;
                return Some(ClockSignal::Completed);
            }
        }
        None
    }

    /// Jump to `target` seconds (clamped to `[0, total]`).
    ///
    /// A running clock keeps running from the new position; a completed clock
    /// resumes running if the target is before the end. Idle and paused
    /// clocks stay paused at the target.
    pub fn seek_to(&mut self, target: f64, now: Instant) {
        let target = if target.is_finite() {
            target.clamp(0.0, self.total)
        } else {
            0.0
        };
        self.elapsed = target;
        self.offset = target;
        if target < self.total {
            self.completion_signalled = false;
        }

        match self.phase {
            ClockPhase::Running => {
                self.anchor = Some(now);
                self.last_seen = Some(now);
                if self.suspended_since.is_some() {
                    self.suspended_since = Some(now);
                }
            }
            ClockPhase::Completed if target < self.total => {
                self.anchor = Some(now);
                self.last_seen = Some(now);
                self.phase = ClockPhase::Running;
            }
            ClockPhase::Completed => {}
            ClockPhase::Idle | ClockPhase::Paused => {
                self.anchor = None;
                self.phase = ClockPhase::Paused;
            }
        }
    }

    /// The runtime stopped being scheduled; freeze until `wake`.
    pub fn suspend(&mut self, now: Instant) {
        if self.phase == ClockPhase::Running && self.suspended_since.is_none() {
            self.elapsed = self.read(now);
            self.suspended_since = Some(now);
        }
    }

    /// The runtime is scheduled again. Returns the absorbed gap, if any.
    pub fn wake(&mut self, now: Instant) -> Option<Duration> {
        let since = self.suspended_since.take()?;
        let gap = now.saturating_duration_since(since);
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor + gap);
            self.last_seen = Some(now);
        }
        debug!(gap_ms = gap.as_millis() as u64, "clock woke from suspension");
        Some(gap)
    }
}
