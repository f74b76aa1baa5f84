//! Error types for the coaching client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for client operations.
pub type CoachResult<T> = Result<T, CoachError>;

/// Errors surfaced to the user. Every variant is terminal for the operation
/// that produced it; the user restarts the flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoachError {
    /// Upload rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response (connection refused, DNS, body read).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Server returned {status}: {detail}")]
    Http {
        status: http::StatusCode,
        detail: String,
    },

    /// A response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The analysis job reported `failed` and no result could be recovered.
    #[error("Analysis failed: {0}")]
    JobFailed(String),

    /// Practice-question generation reported `failed`.
    #[error("Question generation failed: {0}")]
    QuestionsFailed(String),

    /// Polling gave up after the configured wait window.
    #[error("Timed out after {}s waiting for {what}", waited.as_secs())]
    Timeout { what: &'static str, waited: Duration },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File error: {0}")]
    Io(String),
}

impl CoachError {
    /// True for errors raised by a single request, as opposed to a terminal
    /// job state or a local validation problem.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            CoachError::Transport(_) | CoachError::Http { .. } | CoachError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CoachError::Decode(err.to_string())
        } else {
            CoachError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for CoachError {
    fn from(err: std::io::Error) -> Self {
        CoachError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        CoachError::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for CoachError {
    fn from(err: config::ConfigError) -> Self {
        CoachError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_wait_window() {
        let err = CoachError::Timeout {
            what: "the analysis",
            waited: Duration::from_secs(120),
        };
        assert_eq!(err.to_string(), "Timed out after 120s waiting for the analysis");
    }

    #[test]
    fn test_request_failure_classification() {
        assert!(CoachError::Transport("refused".into()).is_request_failure());
        assert!(CoachError::Http {
            status: http::StatusCode::NOT_FOUND,
            detail: "Job not found".into(),
        }
        .is_request_failure());
        assert!(!CoachError::JobFailed("boom".into()).is_request_failure());
        assert!(!CoachError::Validation("no video".into()).is_request_failure());
    }
}
