use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{CoachError, CoachResult};
use crate::state::{AnalysisResult, JobStatusReport, QuestionsReport};

use super::types::{ErrorBody, UploadRequest, UploadResponse};

/// The analysis backend as seen by the pollers and views.
#[async_trait]
pub trait CoachApi: Send + Sync {
    /// Upload a video (and optional supporting document). Returns the job id.
    async fn upload(&self, request: &UploadRequest) -> CoachResult<String>;

    async fn job_status(&self, job_id: &str) -> CoachResult<JobStatusReport>;

    async fn fetch_result(&self, job_id: &str) -> CoachResult<AnalysisResult>;

    /// Start (or return cached) practice-question generation.
    async fn generate_questions(&self, job_id: &str) -> CoachResult<QuestionsReport>;

    async fn questions_status(&self, job_id: &str) -> CoachResult<QuestionsReport>;

    /// Remove the job and its files from the backend.
    async fn delete_job(&self, job_id: &str) -> CoachResult<()>;
}

/// `CoachApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCoachApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCoachApi {
    pub fn new(base_url: &str, timeout: Duration) -> CoachResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoachError::Config(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, job_id: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, path, urlencoding::encode(job_id))
    }
}

#[async_trait]
impl CoachApi for HttpCoachApi {
    async fn upload(&self, request: &UploadRequest) -> CoachResult<String> {
        let (video, video_size) = request.validate_async().await?;

        let mut form =
            reqwest::multipart::Form::new().part("video", file_part(video, Some(video_size)).await?);
        if let Some(supporting) = request.supporting_file.as_deref() {
            form = form.part("supporting_file", file_part(supporting, None).await?);
        }
        if let Some(title) = request.trimmed_title() {
            form = form.text("title", title.to_string());
        }

        let url = format!("{}/api/upload", self.base_url);
        log::info!("Uploading {} to {}", video.display(), url);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Upload failed: {}", err)))?;
        let payload: UploadResponse = read_json(response).await?;
        log::info!("Upload accepted as job {}", payload.job_id);
        Ok(payload.job_id)
    }

    async fn job_status(&self, job_id: &str) -> CoachResult<JobStatusReport> {
        let response = self
            .client
            .get(self.endpoint("status", job_id))
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Failed to query status: {}", err)))?;
        read_json(response).await
    }

    async fn fetch_result(&self, job_id: &str) -> CoachResult<AnalysisResult> {
        let response = self
            .client
            .get(self.endpoint("result", job_id))
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Failed to fetch result: {}", err)))?;
        read_json(response).await
    }

    async fn generate_questions(&self, job_id: &str) -> CoachResult<QuestionsReport> {
        let response = self
            .client
            .post(self.endpoint("generate-questions", job_id))
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Failed to request questions: {}", err)))?;
        read_json(response).await
    }

    async fn questions_status(&self, job_id: &str) -> CoachResult<QuestionsReport> {
        let response = self
            .client
            .get(self.endpoint("questions-status", job_id))
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Failed to query questions: {}", err)))?;
        read_json(response).await
    }

    async fn delete_job(&self, job_id: &str) -> CoachResult<()> {
        let response = self
            .client
            .delete(self.endpoint("jobs", job_id))
            .send()
            .await
            .map_err(|err| CoachError::Transport(format!("Failed to delete job: {}", err)))?;
        let _: serde_json::Value = read_json(response).await?;
        Ok(())
    }
}

/// Multipart part streamed from disk, so large videos are never held in memory.
async fn file_part(path: &Path, size: Option<u64>) -> CoachResult<reqwest::multipart::Part> {
    let read_error =
        |err: std::io::Error| CoachError::Io(format!("Failed to read {}: {}", path.display(), err));
    let file = tokio::fs::File::open(path).await.map_err(read_error)?;
    let size = match size {
        Some(size) => size,
        None => file.metadata().await.map_err(read_error)?.len(),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let part = reqwest::multipart::Part::stream_with_length(reqwest::Body::from(file), size)
        .file_name(file_name)
        .mime_str(mime.essence_str())?;
    Ok(part)
}

/// Decode a success body, or turn a non-2xx response into `CoachError::Http`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> CoachResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| CoachError::Transport(format!("Failed to read response: {}", err)))?;
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|err| err.message())
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(CoachError::Http { status, detail });
    }
    serde_json::from_str(&body).map_err(|err| CoachError::Decode(err.to_string()))
}
