//! Request types and client-side validation for the backend API.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoachError, CoachResult};

/// Largest video the backend accepts.
pub const MAX_VIDEO_BYTES: u64 = 500 * 1024 * 1024;
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];
pub const SUPPORTING_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Everything needed for `POST /api/upload`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadRequest {
    pub video: Option<PathBuf>,
    pub supporting_file: Option<PathBuf>,
    pub title: Option<String>,
}

impl UploadRequest {
    pub fn new(video: impl Into<PathBuf>) -> Self {
        Self {
            video: Some(video.into()),
            ..Self::default()
        }
    }

    /// Check the form before any bytes are sent. Returns the video path.
    pub fn validate(&self) -> CoachResult<&Path> {
        let video = self.checked_paths()?;
        let metadata = std::fs::metadata(video).map_err(|err| unreadable(video, err))?;
        check_video_size(metadata.len())?;
        Ok(video)
    }

    /// `validate` for async callers. Also returns the video size in bytes.
    pub async fn validate_async(&self) -> CoachResult<(&Path, u64)> {
        let video = self.checked_paths()?;
        let metadata = tokio::fs::metadata(video)
            .await
            .map_err(|err| unreadable(video, err))?;
        check_video_size(metadata.len())?;
        Ok((video, metadata.len()))
    }

    /// Presence and file-type checks; touches no files.
    fn checked_paths(&self) -> CoachResult<&Path> {
        let video = self
            .video
            .as_deref()
            .ok_or_else(|| CoachError::Validation("Choose a video to upload.".to_string()))?;
        if !has_extension(video, VIDEO_EXTENSIONS) {
            return Err(CoachError::Validation(
                "Only .mp4 videos are accepted.".to_string(),
            ));
        }
        if let Some(supporting) = self.supporting_file.as_deref() {
            if !has_extension(supporting, SUPPORTING_EXTENSIONS) {
                return Err(CoachError::Validation(
                    "Supporting file must be .pdf, .docx, or .txt.".to_string(),
                ));
            }
        }
        Ok(video)
    }

    pub fn trimmed_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

fn check_video_size(size: u64) -> CoachResult<()> {
    if size > MAX_VIDEO_BYTES {
        return Err(CoachError::Validation(
            "Video file exceeds the 500 MB limit.".to_string(),
        ));
    }
    Ok(())
}

fn unreadable(path: &Path, err: std::io::Error) -> CoachError {
    CoachError::Validation(format!("Cannot read {}: {}", path.display(), err))
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|candidate| *candidate == ext)
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    pub job_id: String,
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
