//! HTTP contract with the analysis backend.

mod client;
mod types;

pub use client::{CoachApi, HttpCoachApi};
pub use types::{UploadRequest, MAX_VIDEO_BYTES, SUPPORTING_EXTENSIONS, VIDEO_EXTENSIONS};

#[cfg(test)]
pub(crate) mod testing;
