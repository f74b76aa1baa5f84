//! State management module
//!
//! Core data structures for the review session:
//! - Marker: Timestamped feedback with category and severity
//! - AnalysisResult: Scores, markers and transcript for one job
//! - Job: Backend job lifecycle and practice-question status
//! - Playback: Rust-side mirror of the video element
//! - Selection: Which marker the feedback panel shows

mod marker;
mod analysis;
mod job;
mod playback;
mod selection;

pub use marker::*;
pub use analysis::*;
pub use job::*;
pub use playback::*;
pub use selection::*;
