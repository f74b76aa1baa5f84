//! Practice-question generation for a finished analysis.

use tokio::time::Instant;

use crate::api::CoachApi;
use crate::error::{CoachError, CoachResult};
use crate::state::{QuestionsReport, QuestionsStatus};

use super::job_poller::PollSchedule;

/// Request practice questions and wait until they are ready.
///
/// A failed status check is logged and retried on the next tick; only a
/// `failed` status, a failed initial request or the timeout end the wait.
pub async fn fetch_questions<A>(api: &A, job_id: &str, schedule: PollSchedule) -> CoachResult<Vec<String>>
where
    A: CoachApi + ?Sized,
{
    let initial = api.generate_questions(job_id).await?;
    if let Some(done) = settle(initial) {
        return done;
    }

    let started = Instant::now();
    loop {
        if schedule.exhausted(started) {
            log::error!("Questions for job {} not ready after {:?}", job_id, schedule.max_wait);
            return Err(CoachError::Timeout {
                what: "practice questions",
                waited: schedule.max_wait,
            });
        }
        tokio::time::sleep(schedule.interval).await;

        match api.questions_status(job_id).await {
            Ok(report) => {
                if let Some(done) = settle(report) {
                    return done;
                }
            }
            Err(err) => log::warn!("Question status check for job {} failed: {}", job_id, err),
        }
    }
}

fn settle(report: QuestionsReport) -> Option<CoachResult<Vec<String>>> {
    match report.status {
        QuestionsStatus::Completed => Some(Ok(report.questions)),
        QuestionsStatus::Failed => Some(Err(CoachError::QuestionsFailed(
            report.error.unwrap_or_else(|| "no reason given".to_string()),
        ))),
        QuestionsStatus::Generating => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use std::time::Duration;

    fn schedule() -> PollSchedule {
        PollSchedule {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(120),
        }
    }

    fn report(status: QuestionsStatus, questions: &[&str]) -> QuestionsReport {
        QuestionsReport {
            status,
            questions: questions.iter().map(|q| q.to_string()).collect(),
            error: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_questions_returned_immediately() {
        let api = ScriptedApi::new("abc");
        api.set_generate(Ok(report(QuestionsStatus::Completed, &["Why now?"])));

        let questions = fetch_questions(&api, "abc", schedule()).await.unwrap();
        assert_eq!(questions, vec!["Why now?".to_string()]);
        assert_eq!(api.calls(), vec!["generate:abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_keep_polling() {
        let api = ScriptedApi::new("abc");
        api.set_generate(Ok(report(QuestionsStatus::Generating, &[])));
        api.push_question_status(Ok(report(QuestionsStatus::Generating, &[])));
        api.push_question_status(Err(CoachError::Transport("reset by peer".to_string())));
        api.push_question_status(Ok(report(QuestionsStatus::Completed, &["What is the cost?", "Who benefits?"])));

        let questions = fetch_questions(&api, "abc", schedule()).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(api.count("questions:"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_generation() {
        let api = ScriptedApi::new("abc");
        api.set_generate(Ok(report(QuestionsStatus::Generating, &[])));
        api.push_question_status(Ok(QuestionsReport {
            status: QuestionsStatus::Failed,
            questions: Vec::new(),
            error: Some("model unavailable".to_string()),
        }));

        let err = fetch_questions(&api, "abc", schedule()).await.unwrap_err();
        assert_eq!(err, CoachError::QuestionsFailed("model unavailable".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_request_error_is_terminal() {
        let api = ScriptedApi::new("abc");
        api.set_generate(Err(CoachError::Transport("refused".to_string())));

        let err = fetch_questions(&api, "abc", schedule()).await.unwrap_err();
        assert!(err.is_request_failure());
        assert_eq!(api.count("questions:"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let api = ScriptedApi::new("abc");
        api.set_generate(Ok(report(QuestionsStatus::Generating, &[])));

        // Empty script: every status check errors and is retried until the deadline.
        let err = fetch_questions(&api, "abc", schedule()).await.unwrap_err();
        assert!(matches!(err, CoachError::Timeout { what: "practice questions", .. }));
        assert_eq!(api.count("questions:"), 60);
    }
}
