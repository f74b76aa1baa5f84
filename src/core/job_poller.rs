//! Waiting for an analysis job to finish.
//!
//! Polls sequentially, so at most one status request is in flight. The loop
//! returns on the first terminal status; dropping the future cancels it.

use std::time::Duration;

use tokio::time::Instant;

use crate::api::CoachApi;
use crate::config::PollingSettings;
use crate::error::{CoachError, CoachResult};
use crate::state::{AnalysisResult, JobStatus, JobStatusReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl PollSchedule {
    pub fn for_jobs(settings: &PollingSettings) -> Self {
        Self {
            interval: settings.status_interval(),
            max_wait: settings.max_wait(),
        }
    }

    pub fn for_questions(settings: &PollingSettings) -> Self {
        Self {
            interval: settings.question_interval(),
            max_wait: settings.max_wait(),
        }
    }

    /// True if waiting one more interval would overrun `max_wait`.
    pub(crate) fn exhausted(&self, started: Instant) -> bool {
        started.elapsed() + self.interval > self.max_wait
    }
}

/// Poll `job_id` until it is terminal, then fetch its result.
///
/// `on_status` sees every status report, for progress display. A `failed`
/// status still gets one result fetch: the backend can hold partial results
/// for a job it flagged as failed.
pub async fn wait_for_result<A, F>(
    api: &A,
    job_id: &str,
    schedule: PollSchedule,
    mut on_status: F,
) -> CoachResult<AnalysisResult>
where
    A: CoachApi + ?Sized,
    F: FnMut(&JobStatusReport),
{
    let started = Instant::now();
    loop {
        let report = api.job_status(job_id).await?;
        log::debug!("Job {} status: {:?}", job_id, report.status);
        on_status(&report);

        match report.status {
            JobStatus::Completed => {
                log::info!("Job {} completed, fetching result", job_id);
                return api.fetch_result(job_id).await;
            }
            JobStatus::Failed => return recover_failed(api, job_id, &report).await,
            JobStatus::Queued | JobStatus::Processing => {}
        }

        if schedule.exhausted(started) {
            log::error!("Job {} still running after {:?}", job_id, schedule.max_wait);
            return Err(CoachError::Timeout {
                what: "the analysis",
                waited: schedule.max_wait,
            });
        }
        tokio::time::sleep(schedule.interval).await;
    }
}

async fn recover_failed<A>(api: &A, job_id: &str, report: &JobStatusReport) -> CoachResult<AnalysisResult>
where
    A: CoachApi + ?Sized,
{
    let reason = report
        .message
        .clone()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| "the backend reported a failure".to_string());
    match api.fetch_result(job_id).await {
        Ok(result) => {
            log::warn!("Job {} reported failure ({}) but a result was available", job_id, reason);
            Ok(result)
        }
        Err(err) => {
            log::error!("Job {} failed: {} (result fetch: {})", job_id, reason, err);
            Err(CoachError::JobFailed(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use crate::core::marker_geometry::position;
    use crate::state::{FeedbackCategory, Marker, Scores};

    fn schedule() -> PollSchedule {
        PollSchedule {
            interval: Duration::from_secs(3),
            max_wait: Duration::from_secs(120),
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            scores: Scores {
                gestures: 22,
                inflection: 20,
                clarity: 23,
                content: 21,
                total: 86,
            },
            markers: vec![
                Marker::new(FeedbackCategory::Clarity, 42.5, 44.0, "Filler word"),
                Marker::new(FeedbackCategory::Gestures, 70.0, 75.0, "Crossed arms"),
            ],
            transcript: Some("Good morning.".to_string()),
            video_url: "/api/video/abc".to_string(),
            metadata: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_then_completed() {
        let api = ScriptedApi::new("abc");
        api.push_status(Ok(JobStatusReport::new(JobStatus::Processing)));
        api.push_status(Ok(JobStatusReport::new(JobStatus::Processing)));
        api.push_status(Ok(JobStatusReport::new(JobStatus::Completed)));
        api.set_result(Ok(sample_result()));

        let mut seen = Vec::new();
        let result = wait_for_result(&api, "abc", schedule(), |report| seen.push(report.status))
            .await
            .unwrap();

        assert_eq!(seen, vec![JobStatus::Processing, JobStatus::Processing, JobStatus::Completed]);
        assert_eq!(result.scores.total, 86);
        assert_eq!(result.markers.len(), 2);
        assert!((position(result.markers[0].start, 100.0) - 42.5).abs() < 1e-9);
        assert!((position(result.markers[1].start, 100.0) - 70.0).abs() < 1e-9);
        assert_eq!(
            api.calls(),
            vec!["status:abc", "status:abc", "status:abc", "result:abc"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_falls_back_to_result() {
        let api = ScriptedApi::new("abc");
        api.push_status(Ok(JobStatusReport::new(JobStatus::Failed)));
        api.set_result(Ok(sample_result()));

        let result = wait_for_result(&api, "abc", schedule(), |_| {}).await.unwrap();
        assert_eq!(result.markers.len(), 2);
        assert_eq!(api.count("result:"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_without_result() {
        let api = ScriptedApi::new("abc");
        let mut report = JobStatusReport::new(JobStatus::Failed);
        report.message = Some("Video exceeds 3 minute duration limit".to_string());
        api.push_status(Ok(report));
        api.set_result(Err(CoachError::Http {
            status: http::StatusCode::BAD_REQUEST,
            detail: "Job not completed".to_string(),
        }));

        let err = wait_for_result(&api, "abc", schedule(), |_| {}).await.unwrap_err();
        assert_eq!(
            err,
            CoachError::JobFailed("Video exceeds 3 minute duration limit".to_string())
        );
        assert_eq!(api.count("result:"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_calls_after_terminal_status() {
        let api = ScriptedApi::new("abc");
        api.push_status(Ok(JobStatusReport::new(JobStatus::Queued)));
        api.push_status(Ok(JobStatusReport::new(JobStatus::Completed)));
        // Extra scripted statuses must never be consumed.
        api.push_status(Ok(JobStatusReport::new(JobStatus::Processing)));
        api.set_result(Ok(sample_result()));

        wait_for_result(&api, "abc", schedule(), |_| {}).await.unwrap();
        tokio::time::sleep(schedule().interval * 3).await;

        assert_eq!(api.count("status:"), 2);
        assert_eq!(api.statuses.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_max_wait() {
        let api = ScriptedApi::new("abc");
        for _ in 0..100 {
            api.push_status(Ok(JobStatusReport::new(JobStatus::Processing)));
        }

        let started = Instant::now();
        let err = wait_for_result(&api, "abc", schedule(), |_| {}).await.unwrap_err();
        assert!(matches!(err, CoachError::Timeout { waited, .. } if waited == Duration::from_secs(120)));
        assert!(started.elapsed() <= Duration::from_secs(120));
        assert_eq!(api.count("status:"), 41);
        assert_eq!(api.count("result:"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_is_terminal() {
        let api = ScriptedApi::new("abc");
        api.push_status(Ok(JobStatusReport::new(JobStatus::Processing)));
        api.push_status(Err(CoachError::Transport("connection refused".to_string())));
        api.push_status(Ok(JobStatusReport::new(JobStatus::Completed)));

        let err = wait_for_result(&api, "abc", schedule(), |_| {}).await.unwrap_err();
        assert!(err.is_request_failure());
        assert_eq!(api.count("status:"), 2);
    }
}
