//! Millisecond/hour conversion used by every report format.

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours rounded to two decimal places: `round(millis / 3600000 * 100) / 100`.
///
/// Halves round up for the non-negative durations the report produces.
pub fn millis_to_hours(millis: i64) -> f64 {
    (millis as f64 / MILLIS_PER_HOUR * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_fractional_hours() {
        assert_eq!(millis_to_hours(0), 0.0);
        assert_eq!(millis_to_hours(3_600_000), 1.0);
        assert_eq!(millis_to_hours(4_500_000), 1.25);
        assert_eq!(millis_to_hours(1_200_000), 0.33);
    }

    #[test]
    fn rounds_half_up_at_boundaries() {
        assert_eq!(millis_to_hours(18_000), 0.01);
        assert_eq!(millis_to_hours(54_000), 0.02);
        assert_eq!(millis_to_hours(90_000), 0.03);
        assert_eq!(millis_to_hours(162_000), 0.05);
    }
}
