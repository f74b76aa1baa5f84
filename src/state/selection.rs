//! Which feedback marker the panel is showing.
//!
//! Playback drives an automatic selection; a click pins a marker manually.
//! A pinned marker survives time updates that land within `buffer` seconds of
//! its range, which covers the lookback seek the click itself triggers.

use std::time::Instant;

use crate::core::marker_geometry::active_marker;

use super::marker::Marker;

/// Timing constants for manual selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionTuning {
    /// Seconds of context shown before a clicked marker's start.
    pub lookback: f64,
    /// Slack around a pinned marker's range before it is released.
    pub buffer: f64,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            lookback: 1.0,
            buffer: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedbackSelection {
    #[default]
    None,
    /// Derived from the playback position.
    Auto(Marker),
    /// Pinned by a click.
    Manual { marker: Marker, selected_at: Instant },
}

impl FeedbackSelection {
    pub fn marker(&self) -> Option<&Marker> {
        match self {
            FeedbackSelection::None => None,
            FeedbackSelection::Auto(marker) => Some(marker),
            FeedbackSelection::Manual { marker, .. } => Some(marker),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, FeedbackSelection::Manual { .. })
    }

    /// True when `marker` is the one currently shown.
    pub fn is_selected(&self, marker: &Marker) -> bool {
        self.marker()
            .map(|current| current.same_marker(marker))
            .unwrap_or(false)
    }

    /// Pin `marker` and return the playback time to seek to.
    ///
    /// Apply this before dispatching the seek so the seek's own time update
    /// sees the manual state.
    pub fn on_marker_clicked(&mut self, marker: Marker, now: Instant, tuning: SelectionTuning) -> f64 {
        let target = (marker.start - tuning.lookback).max(0.0);
        *self = FeedbackSelection::Manual {
            marker,
            selected_at: now,
        };
        target
    }

    /// Reconcile with a new playback time. Returns true if the shown marker changed.
    pub fn on_time_update(&mut self, time: f64, markers: &[Marker], tuning: SelectionTuning) -> bool {
        if let FeedbackSelection::Manual { marker, .. } = self {
            let window_start = marker.start - tuning.buffer;
            let window_end = marker.end + tuning.buffer;
            if time >= window_start && time <= window_end {
                return false;
            }
        }

        let next = match active_marker(markers, time) {
            Some(marker) => FeedbackSelection::Auto(marker.clone()),
            None => FeedbackSelection::None,
        };
        let changed = match (self.marker(), next.marker()) {
            (Some(current), Some(candidate)) => !current.same_marker(candidate),
            (None, None) => false,
            _ => true,
        };
        let was_manual = self.is_manual();
        *self = next;
        changed || was_manual
    }

    pub fn clear(&mut self) {
        *self = FeedbackSelection::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedbackCategory;

    fn markers() -> Vec<Marker> {
        vec![
            Marker::new(FeedbackCategory::Content, 0.0, 5.0, "Weak introduction"),
            Marker::new(FeedbackCategory::Clarity, 20.0, 22.0, "Filler word"),
            Marker::new(FeedbackCategory::Gestures, 30.0, 35.0, "Crossed arms"),
        ]
    }

    #[test]
    fn test_time_update_selects_covering_marker() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        assert!(selection.on_time_update(21.0, &markers, tuning));
        assert!(matches!(&selection, FeedbackSelection::Auto(m) if m.label == "Filler word"));

        assert!(!selection.on_time_update(21.5, &markers, tuning));
        assert!(selection.on_time_update(25.0, &markers, tuning));
        assert_eq!(selection, FeedbackSelection::None);
    }

    #[test]
    fn test_click_returns_lookback_target() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        let target = selection.on_marker_clicked(markers[1].clone(), Instant::now(), tuning);
        assert_eq!(target, 19.0);
        assert!(selection.is_manual());

        let target = selection.on_marker_clicked(markers[0].clone(), Instant::now(), tuning);
        assert_eq!(target, 0.0);
    }

    #[test]
    fn test_manual_survives_lookback_seek() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        let clicked = markers[1].clone();
        let target = selection.on_marker_clicked(clicked.clone(), Instant::now(), tuning);
        // The seek lands before the marker, where no marker is active.
        assert!(!selection.on_time_update(target, &markers, tuning));
        assert!(selection.is_selected(&clicked));
        assert!(selection.is_manual());

        for time in [18.0, 19.5, 20.0, 21.0, 22.0, 24.0] {
            selection.on_time_update(time, &markers, tuning);
            assert!(selection.is_selected(&clicked), "released at {}", time);
        }
    }

    #[test]
    fn test_manual_released_after_buffer() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        selection.on_marker_clicked(markers[1].clone(), Instant::now(), tuning);
        assert!(selection.on_time_update(24.5, &markers, tuning));
        assert_eq!(selection, FeedbackSelection::None);

        selection.on_marker_clicked(markers[1].clone(), Instant::now(), tuning);
        assert!(selection.on_time_update(31.0, &markers, tuning));
        assert!(matches!(&selection, FeedbackSelection::Auto(m) if m.label == "Crossed arms"));
    }

    #[test]
    fn test_manual_not_overridden_by_overlapping_auto() {
        let markers = vec![
            Marker::new(FeedbackCategory::Content, 0.0, 60.0, "Long section"),
            Marker::new(FeedbackCategory::Clarity, 10.0, 11.0, "Filler word"),
        ];
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        let clicked = markers[1].clone();
        selection.on_marker_clicked(clicked.clone(), Instant::now(), tuning);
        selection.on_time_update(10.5, &markers, tuning);
        assert!(selection.is_selected(&clicked));

        selection.on_time_update(20.0, &markers, tuning);
        assert!(matches!(&selection, FeedbackSelection::Auto(m) if m.label == "Long section"));
    }

    #[test]
    fn test_structural_identity_across_rebuilds() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        let tuning = SelectionTuning::default();

        selection.on_time_update(31.0, &markers, tuning);
        let rebuilt = markers.clone();
        assert!(!selection.on_time_update(32.0, &rebuilt, tuning));
        assert!(selection.is_selected(&rebuilt[2]));
    }

    #[test]
    fn test_clear() {
        let markers = markers();
        let mut selection = FeedbackSelection::default();
        selection.on_marker_clicked(markers[0].clone(), Instant::now(), SelectionTuning::default());
        selection.clear();
        assert_eq!(selection.marker(), None);
    }
}
