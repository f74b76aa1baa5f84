//! Backend job lifecycle types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Status of an analysis job as reported by `/api/status/{job_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Queued => "Queued",
            JobStatus::Processing => "Processing",
            JobStatus::Completed => "Complete",
            JobStatus::Failed => "Failed",
        }
    }
}

/// Full status payload. Only `status` is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusReport {
    pub status: JobStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl JobStatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            progress: None,
            message: None,
            title: None,
        }
    }

    /// Progress clamped to 0..=100.
    pub fn progress_percent(&self) -> Option<u8> {
        self.progress.map(|value| value.clamp(0.0, 100.0).round() as u8)
    }
}

/// A submitted job as remembered by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct JobHandle {
    pub id: String,
    pub title: String,
    pub submitted_at: DateTime<Local>,
}

impl JobHandle {
    pub fn new(id: impl Into<String>, title: Option<&str>) -> Self {
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or("Untitled Presentation")
            .to_string();
        Self {
            id: id.into(),
            title,
            submitted_at: Local::now(),
        }
    }

    /// Whole seconds since submission, for the processing view.
    pub fn elapsed_secs(&self, now: DateTime<Local>) -> i64 {
        (now - self.submitted_at).num_seconds().max(0)
    }
}

/// Status of practice-question generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionsStatus {
    Generating,
    Completed,
    Failed,
}

/// Payload shared by `/api/generate-questions` and `/api/questions-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsReport {
    pub status: QuestionsStatus,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_report_decodes_progress() {
        let report: JobStatusReport = serde_json::from_str(
            r#"{"status": "processing", "title": "Pitch", "progress": 20, "message": "Uploading video to AI..."}"#,
        )
        .unwrap();
        assert_eq!(report.status, JobStatus::Processing);
        assert_eq!(report.progress_percent(), Some(20));
        assert_eq!(report.message.as_deref(), Some("Uploading video to AI..."));
    }

    #[test]
    fn test_status_report_minimal() {
        let report: JobStatusReport = serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(report, JobStatusReport::new(JobStatus::Completed));
        assert_eq!(report.progress_percent(), None);
    }

    #[test]
    fn test_job_handle_default_title() {
        let handle = JobHandle::new("abc", Some("   "));
        assert_eq!(handle.title, "Untitled Presentation");
        let later = handle.submitted_at + chrono::Duration::seconds(42);
        assert_eq!(handle.elapsed_secs(later), 42);
    }

    #[test]
    fn test_questions_report_generating() {
        let report: QuestionsReport = serde_json::from_str(r#"{"status": "generating"}"#).unwrap();
        assert_eq!(report.status, QuestionsStatus::Generating);
        assert!(report.questions.is_empty());
    }
}
