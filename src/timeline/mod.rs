//! Feedback timeline
//!
//! Markers laid out in lanes over a percentage-based track, with a ruler,
//! playhead and click/drag scrubbing.

mod marker_element;
mod panel;
mod playback_controls;
mod ruler;
mod track_row;

pub use panel::FeedbackTimeline;
pub(crate) use playback_controls::PlaybackBtn;

use serde::Deserialize;

/// Horizontal bounds of the track element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(crate) struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    /// Fraction of the track under `client_x`, clamped to `[0, 1]`.
    pub fn fraction_at(&self, client_x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((client_x - self.left) / self.width).clamp(0.0, 1.0)
    }
}
