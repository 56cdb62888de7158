//! Occupancy percentage helpers.
//!
//! Every percentage in the system is derived through [`safe_percent`] so a
//! zero capacity can never turn into a division error.

/// Whole-number occupancy percentage for `count` out of `capacity`.
///
/// Returns `0.0` when `capacity` is zero or negative. The result is not
/// clamped: a count above capacity yields a value above 100. Halves round to
/// the even neighbour, so 1 of 8 is 12 and 3 of 8 is 38.
///
/// ```
/// use recwatch_core::percent::safe_percent;
///
/// assert_eq!(safe_percent(8, 20), 40.0);
/// assert_eq!(safe_percent(5, 0), 0.0);
/// ```
pub fn safe_percent(count: i64, capacity: i64) -> f64 {
    if capacity <= 0 {
        return 0.0;
    }
    (100.0 * count as f64 / capacity as f64).round_ties_even()
}

/// Round to one decimal place, halves to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
