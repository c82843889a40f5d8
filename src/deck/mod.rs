//! PREP deck data model
//!
//! A deck is the four PREP sections (Point, Reason, Example, Summary), an
//! optional reference link shown with the example section, the per-section
//! durations, and the opaque id used for cloud round-trips.
//!
//! - `section`: section keys, titles and slide layout
//! - `record`: the persisted record and its durations
//! - `preset`: built-in duration presets
//! - `exchange`: export/import documents and the cloud deck shape

pub mod exchange;
mod preset;
mod record;
mod section;

pub use preset::Preset;
pub use record::{
    coerce_duration, validate_link, PrepRecord, RecordError, SectionDurations,
    DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS,
};
pub use section::{SectionKey, Slide, SlideLayout};
