//! Duration schedule: per-slide durations and their cumulative boundaries.
//!
//! `boundaries()[i]` is the offset (in seconds) at which slide `i` ends, so
//! slide `i` is active for `start_of(i) <= elapsed < end_of(i)`. The schedule
//! works for any positive number of slides.

use tracing::debug;

use crate::deck::{SectionDurations, DEFAULT_DURATION_SECS};

/// Ordered slide durations with their cumulative end offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationSchedule {
    durations: Vec<f64>,
    boundaries: Vec<f64>,
}

impl DurationSchedule {
    /// Build a schedule from raw second values.
    ///
    /// Values that are not positive are replaced with the default duration,
    /// so the timeline is always well formed. An empty input yields a single
    /// default-length slide.
    pub fn from_seconds<I>(seconds: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut durations: Vec<f64> = seconds
            .into_iter()
            .map(|s| {
                if s > 0 {
                    s as f64
                } else {
                    debug!(value = s, "coercing invalid slide duration to default");
                    f64::from(DEFAULT_DURATION_SECS)
                }
            })
            .collect();
        if durations.is_empty() {
            durations.push(f64::from(DEFAULT_DURATION_SECS));
        }

        let mut boundaries = Vec::with_capacity(durations.len());
        let mut cumulative = 0.0f64;
        for d in &durations {
            cumulative += d;
            boundaries.push(cumulative);
        }

        Self {
            durations,
            boundaries,
        }
    }

    /// Build the four-section PREP schedule.
    pub fn from_durations(durations: &SectionDurations) -> Self {
        Self::from_seconds(durations.in_order().iter().map(|&s| i64::from(s)))
    }

    /// Number of slides (always at least one).
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// True when there are no slides.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    /// Total length in seconds.
    pub fn total(&self) -> f64 {
        self.boundaries.last().copied().unwrap_or(0.0)
    }

    /// Cumulative end offsets, one per slide.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Offset at which slide `index` starts (clamped to the last slide).
    pub fn start_of(&self, index: usize) -> f64 {
        let index = index.min(self.last_index());
        if index == 0 {
            0.0
        } else {
            self.boundaries[index - 1]
        }
    }

    /// Offset at which slide `index` ends (clamped to the last slide).
    pub fn end_of(&self, index: usize) -> f64 {
        self.boundaries[index.min(self.last_index())]
    }

    pub fn duration_of(&self, index: usize) -> f64 {
        self.durations[index.min(self.last_index())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_prep_schedule() {
        let schedule = DurationSchedule::from_durations(&SectionDurations::default());
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.boundaries(), &[15.0, 30.0, 45.0, 60.0]);
        assert_eq!(schedule.total(), 60.0);
    }

    #[test]
    fn invalid_values_become_default() {
        let schedule = DurationSchedule::from_seconds([10, 0, -3]);
        assert_eq!(schedule.durations(), &[10.0, 15.0, 15.0]);
        assert_eq!(schedule.total(), 40.0);
    }

    #[test]
    fn works_for_any_length() {
        let schedule = DurationSchedule::from_seconds([5, 5, 5, 5, 5, 5, 5]);
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule.total(), 35.0);
        assert_eq!(schedule.start_of(3), 15.0);
        assert_eq!(schedule.end_of(3), 20.0);

        let single = DurationSchedule::from_seconds([8]);
        assert_eq!(single.last_index(), 0);
        assert_eq!(single.start_of(0), 0.0);
    }

    #[test]
    fn empty_input_still_has_one_slide() {
        let schedule = DurationSchedule::from_seconds(Vec::<i64>::new());
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total(), 15.0);
    }

    #[test]
    fn boundaries_are_non_decreasing() {
        let schedule = DurationSchedule::from_seconds([3, 90, 7, 40]);
        assert!(schedule.boundaries().windows(2).all(|w| w[0] <= w[1]));
        assert!(schedule.total() > 0.0);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let schedule = DurationSchedule::from_seconds([10, 20]);
        assert_eq!(schedule.start_of(9), 10.0);
        assert_eq!(schedule.end_of(9), 30.0);
        assert_eq!(schedule.duration_of(9), 20.0);
    }
}
