//! Playback state for the review video.
//!
//! The `<video>` element lives in the webview. `PlaybackController` keeps the
//! Rust-side copy of its state, folds in the events the element reports and
//! turns user intents into `MediaCommand`s for the bridge to execute.

use serde::{Deserialize, Serialize};

use crate::core::marker_geometry::{position, time_at_fraction};

use super::marker::Marker;

/// Instruction for the webview media bridge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaCommand {
    Play,
    Pause,
    Seek { time: f64 },
    /// Stop the frame loop and drop all listeners. Sent on teardown.
    Detach,
}

/// Report from the webview media bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaEvent {
    Metadata { duration: f64 },
    /// Sent every animation frame while playing, and after seeks.
    Time { current_time: f64 },
    Playing,
    Paused,
    Ended,
    /// `play()` was refused, e.g. by an autoplay policy. The source is still usable.
    PlayRejected { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackController {
    pub current_time: f64,
    /// Unknown until the element has loaded metadata.
    pub duration: Option<f64>,
    pub is_playing: bool,
    /// True while the user drags the playhead.
    pub is_seeking: bool,
    /// Set when the element reports a media error; playback commands are
    /// refused until a new source is loaded.
    pub error: Option<String>,
    /// Last refused play request. Cleared once playback starts.
    pub notice: Option<String>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known duration, or 0 before metadata loads.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn toggle_play(&mut self) -> Option<MediaCommand> {
        if self.has_error() {
            return None;
        }
        if self.is_playing {
            Some(MediaCommand::Pause)
        } else {
            Some(MediaCommand::Play)
        }
    }

    /// Seek to `fraction` of the duration. Ignored until metadata is loaded.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<MediaCommand> {
        let duration = self.known_duration()?;
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        self.seek_to(time_at_fraction(fraction, duration))
    }

    /// Seek a little before `marker` so the lead-in is visible.
    pub fn seek_to_marker(&mut self, marker: &Marker, lookback: f64) -> Option<MediaCommand> {
        self.seek_to_time(marker.start - lookback)
    }

    /// Seek to an absolute time, clamped to the media range when known.
    pub fn seek_to_time(&mut self, time: f64) -> Option<MediaCommand> {
        if self.has_error() {
            return None;
        }
        let mut target = time.max(0.0);
        if let Some(duration) = self.known_duration() {
            target = target.min(duration);
        }
        self.seek_to(target)
    }

    /// Relative seek for keyboard stepping. Ignored until metadata is loaded.
    pub fn step(&mut self, delta: f64) -> Option<MediaCommand> {
        self.known_duration()?;
        self.seek_to_time(self.current_time + delta)
    }

    pub fn begin_scrub(&mut self) {
        self.is_seeking = true;
    }

    pub fn end_scrub(&mut self) {
        self.is_seeking = false;
    }

    /// Fold an element event into the state. Returns true when `current_time` moved.
    pub fn apply(&mut self, event: MediaEvent) -> bool {
        match event {
            MediaEvent::Metadata { duration } => {
                if duration.is_finite() && duration > 0.0 {
                    self.duration = Some(duration);
                }
                self.error = None;
                false
            }
            MediaEvent::Time { current_time } => {
                let moved = (current_time - self.current_time).abs() > f64::EPSILON;
                self.current_time = current_time.max(0.0);
                moved
            }
            MediaEvent::Playing => {
                self.is_playing = true;
                self.notice = None;
                false
            }
            MediaEvent::Paused => {
                self.is_playing = false;
                false
            }
            MediaEvent::Ended => {
                self.is_playing = false;
                if let Some(duration) = self.duration {
                    self.current_time = duration;
                }
                false
            }
            MediaEvent::PlayRejected { message } => {
                self.is_playing = false;
                self.notice = Some(message);
                false
            }
            MediaEvent::Error { message } => {
                self.is_playing = false;
                self.error = Some(message);
                false
            }
        }
    }

    /// Playhead position as a percentage of the duration.
    pub fn progress_percent(&self) -> f64 {
        position(self.current_time, self.duration_or_zero())
    }

    fn known_duration(&self) -> Option<f64> {
        self.duration.filter(|duration| *duration > 0.0)
    }

    fn seek_to(&mut self, time: f64) -> Option<MediaCommand> {
        // Optimistic: the element confirms with a Time event once the seek lands.
        self.current_time = time;
        Some(MediaCommand::Seek { time })
    }
}
