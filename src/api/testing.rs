//! Scripted in-memory backend for poller and view-model tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoachError, CoachResult};
use crate::state::{AnalysisResult, JobStatusReport, QuestionsReport};

use super::{CoachApi, UploadRequest};

/// Replays queued responses and records every call in order.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    pub job_id: String,
    pub statuses: Mutex<VecDeque<CoachResult<JobStatusReport>>>,
    pub result: Mutex<Option<CoachResult<AnalysisResult>>>,
    pub generate: Mutex<Option<CoachResult<QuestionsReport>>>,
    pub question_statuses: Mutex<VecDeque<CoachResult<QuestionsReport>>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            ..Self::default()
        }
    }

    pub fn push_status(&self, status: CoachResult<JobStatusReport>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub fn set_result(&self, result: CoachResult<AnalysisResult>) {
        *self.result.lock().unwrap() = Some(result);
    }

    pub fn set_generate(&self, report: CoachResult<QuestionsReport>) {
        *self.generate.lock().unwrap() = Some(report);
    }

    pub fn push_question_status(&self, report: CoachResult<QuestionsReport>) {
        self.question_statuses.lock().unwrap().push_back(report);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn exhausted(what: &str) -> CoachError {
    CoachError::Transport(format!("script exhausted: {}", what))
}

#[async_trait]
impl CoachApi for ScriptedApi {
    async fn upload(&self, request: &UploadRequest) -> CoachResult<String> {
        self.record("upload".to_string());
        request.validate()?;
        Ok(self.job_id.clone())
    }

    async fn job_status(&self, job_id: &str) -> CoachResult<JobStatusReport> {
        self.record(format!("status:{}", job_id));
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("status")))
    }

    async fn fetch_result(&self, job_id: &str) -> CoachResult<AnalysisResult> {
        self.record(format!("result:{}", job_id));
        self.result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(exhausted("result")))
    }

    async fn generate_questions(&self, job_id: &str) -> CoachResult<QuestionsReport> {
        self.record(format!("generate:{}", job_id));
        self.generate
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(exhausted("generate")))
    }

    async fn questions_status(&self, job_id: &str) -> CoachResult<QuestionsReport> {
        self.record(format!("questions:{}", job_id));
        self.question_statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("questions")))
    }

    async fn delete_job(&self, job_id: &str) -> CoachResult<()> {
        self.record(format!("delete:{}", job_id));
        Ok(())
    }
}
