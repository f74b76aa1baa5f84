//! Mapping marker time ranges onto a percentage-based timeline.

use crate::state::Marker;

/// Left offset of `start` as a percentage of `duration`, clamped to `[0, 100]`.
/// Returns 0 until the duration is known.
pub fn position(start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (start / duration * 100.0).clamp(0.0, 100.0)
}

/// Width of `[start, end]` as a percentage of `duration`. Returns 0 until the
/// duration is known.
pub fn width(start: f64, end: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (end - start) / duration * 100.0
}

/// Rendered width: never narrower than `min_percent`, so short markers stay clickable.
pub fn display_width(start: f64, end: f64, duration: f64, min_percent: f64) -> f64 {
    width(start, end, duration).max(min_percent)
}

/// First marker in list order whose closed range contains `time`.
pub fn active_marker(markers: &[Marker], time: f64) -> Option<&Marker> {
    markers.iter().find(|marker| marker.contains(time))
}

/// Playback time for a click at `fraction` of the timeline width.
pub fn time_at_fraction(fraction: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0) * duration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedbackCategory;

    #[test]
    fn test_zero_duration_guards() {
        for duration in [0.0, -1.0, -100.0] {
            for start in [-5.0, 0.0, 3.0, 1e9] {
                assert_eq!(position(start, duration), 0.0);
                assert_eq!(width(start, start + 2.0, duration), 0.0);
            }
        }
    }

    #[test]
    fn test_position_is_proportional() {
        assert!((position(42.5, 100.0) - 42.5).abs() < 1e-9);
        assert!((position(30.0, 120.0) - 25.0).abs() < 1e-9);
        assert_eq!(position(0.0, 60.0), 0.0);
        assert_eq!(position(60.0, 60.0), 100.0);
    }

    #[test]
    fn test_position_clamped() {
        assert_eq!(position(150.0, 100.0), 100.0);
        assert_eq!(position(-3.0, 100.0), 0.0);
    }

    #[test]
    fn test_width_and_minimum() {
        assert!((width(10.0, 15.0, 200.0) - 2.5).abs() < 1e-9);
        assert!((display_width(10.0, 10.1, 200.0, 0.3) - 0.3).abs() < 1e-9);
        assert!((display_width(10.0, 15.0, 200.0, 0.3) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_active_marker_first_match_wins() {
        let markers = vec![
            Marker::new(FeedbackCategory::Content, 0.0, 10.0, "intro"),
            Marker::new(FeedbackCategory::Clarity, 5.0, 6.0, "filler"),
        ];
        assert_eq!(active_marker(&markers, 5.5).map(|m| m.label.as_str()), Some("intro"));
        assert_eq!(active_marker(&markers, 10.0).map(|m| m.label.as_str()), Some("intro"));
        assert!(active_marker(&markers, 10.5).is_none());
        assert!(active_marker(&[], 1.0).is_none());
    }

    #[test]
    fn test_time_at_fraction() {
        assert_eq!(time_at_fraction(0.5, 80.0), 40.0);
        assert_eq!(time_at_fraction(1.5, 80.0), 80.0);
        assert_eq!(time_at_fraction(0.5, 0.0), 0.0);
    }
}
