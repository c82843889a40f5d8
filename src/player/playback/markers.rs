//! Section markers for the progress bar.
//!
//! Every slide after the first gets a marker at the offset where it starts,
//! labelled with the slide title.

use crate::deck::Slide;
use crate::player::state::MarkerPosition;
use crate::schedule::DurationSchedule;

/// Collect slide start markers with their cumulative times.
///
/// # Arguments
/// * `schedule` - The duration schedule of the presentation
/// * `slides` - Slides in presentation order (used for labels)
///
/// # Returns
/// A vector of `MarkerPosition` structs sorted by time
pub fn collect_section_markers(schedule: &DurationSchedule, slides: &[Slide]) -> Vec<MarkerPosition> {
    (1..schedule.len())
        .map(|i| MarkerPosition {
            time: schedule.start_of(i),
            label: slides
                .get(i)
                .map(|s| s.title.to_string())
                .unwrap_or_else(|| format!("{}", i + 1)),
        })
        .collect()
}
