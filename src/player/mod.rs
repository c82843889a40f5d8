//! Presentation player
//!
//! Plays a PREP record as a timed slideshow in the terminal.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `playback/`: anchor-based clock, slide index resolver, section markers
//! - `controller`: `PlaybackController`, the only timing API callers use
//! - `state`: view state (help overlay, go-to field, banners) and shared types
//! - `input/`: `InputRouter` and event dispatch
//! - `render/`: header, slide body, progress bar, footer, help, recovery screen
//! - `boundary`: failure boundary with retry / return-to-edit
//! - `native`: terminal acquisition and the frame loop
//!
//! # Usage
//!
//! ```no_run
//! use prepdeck::deck::PrepRecord;
//! use prepdeck::player::{present, PresentOptions, PresentationOutcome};
//!
//! let record = PrepRecord {
//!     point: "Ship weekly".to_string(),
//!     ..PrepRecord::default()
//! };
//! match present(&record, &PresentOptions::default()).unwrap() {
//!     PresentationOutcome::Exited => println!("Back to editing"),
//!     PresentationOutcome::Interrupted => println!("Interrupted"),
//!     PresentationOutcome::Failed(e) => eprintln!("Presentation failed: {}", e),
//! }
//! ```

pub mod boundary;
pub mod controller;
pub mod input;
mod native;
pub mod playback;
pub mod render;
pub mod state;

pub use controller::{ControllerEvent, PlaybackController};
pub use native::{
    present, PresentError, PresentOptions, PresentationOutcome, TerminalGuard,
    DEFAULT_FRAME_INTERVAL,
};
pub use state::{Focus, InputResult, MarkerPosition, PresentationState};
