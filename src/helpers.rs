//! Shared helpers for reading Open-Meteo parallel arrays.
//!
//! Daily and hourly series arrive as parallel arrays indexed by position. Any
//! array may be missing, shorter than its `time` axis, or hold `null` entries;
//! all three cases read as "absent" here, never as an error.

/// Read position `index` of an optional series.
pub(crate) fn value_at<T: Copy>(series: Option<&[Option<T>]>, index: usize) -> Option<T> {
    series.and_then(|values| values.get(index).copied().flatten())
}

/// Return the first present value at `index` across `sources`, in order.
///
/// Used to reconcile redundant upstream fields, e.g. swell-specific, combined
/// and wind-wave heights for the same day.
pub(crate) fn first_present<T: Copy>(sources: &[Option<&[Option<T>]>], index: usize) -> Option<T> {
    sources
        .iter()
        .find_map(|&series| value_at(series, index))
}
