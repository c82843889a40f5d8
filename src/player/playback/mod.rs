//! Playback timing for the presentation.
//!
//! This module holds the anchor-based clock, the slide index resolver and the
//! section markers shown on the progress bar.

mod clock;
mod markers;
mod resolve;

pub use clock::{elapsed_from, ClockPhase, ClockSignal, PlaybackClock, DEFAULT_SUSPEND_THRESHOLD};
pub use markers::collect_section_markers;
pub use resolve::resolve;
