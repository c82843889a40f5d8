//! Slide index resolution.

/// Index of the slide active at `elapsed`.
///
/// Returns the smallest `i` with `elapsed < boundaries[i]`, or the last index
/// once `elapsed` reaches the total, so the result is always in range and the
/// final slide stays active at and after completion. Zero-length slides are
/// skipped. An empty boundary list resolves to 0.
pub fn resolve(elapsed: f64, boundaries: &[f64]) -> usize {
    let Some(last) = boundaries.len().checked_sub(1) else {
        return 0;
    };
    boundaries.partition_point(|&end| end <= elapsed).min(last)
}
