//! Remote Client: the single point of entry for all backend calls.
//!
//! Stateless request/response adapter over the processing service. The
//! Submission Controller talks to it through the [`ResumeProcessor`] trait,
//! so the state machine stays testable without a network.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{HealthStatus, ProcessResponse, ResultBundle, ResumeFile};

/// AI processing is multi-minute; give every request a generous window.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Target format of an export, selecting the rendering endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Txt,
    Pdf,
    Docx,
}

impl DownloadFormat {
    /// Parses a user-supplied format string. Unrecognized values fall back
    /// to plain text rather than erroring.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => DownloadFormat::Pdf,
            "docx" => DownloadFormat::Docx,
            _ => DownloadFormat::Txt,
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "/download-txt",
            DownloadFormat::Pdf => "/download-pdf",
            DownloadFormat::Docx => "/download-docx",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "txt",
            DownloadFormat::Pdf => "pdf",
            DownloadFormat::Docx => "docx",
        }
    }
}

/// One export action: the text to render and the filename the saved file
/// should carry. Transient; built per download action.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub content: String,
    pub filename: String,
    pub format: DownloadFormat,
}

/// The submit capability, as the Submission Controller sees it.
#[async_trait]
pub trait ResumeProcessor: Send + Sync {
    async fn process(
        &self,
        file: &ResumeFile,
        job_title: &str,
        job_description: &str,
    ) -> Result<ResultBundle, AppError>;
}

/// HTTP client for the resume-processing backend.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /health: verifies the backend is reachable without submitting.
    pub async fn health(&self) -> Result<HealthStatus, AppError> {
        let response = self.client.get(self.url("/health")).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status,
                detail: extract_detail(&body),
            });
        }

        Ok(response.json().await?)
    }

    /// POST /download-{txt,pdf,docx}: renders `content` into the requested
    /// format and returns the binary payload. All failures fold into
    /// [`AppError::Export`] with the server detail when available.
    pub async fn download(&self, request: &ExportRequest) -> Result<Bytes, AppError> {
        let form = multipart::Form::new()
            .text("content", request.content.clone())
            .text("filename", request.filename.clone());

        debug!(
            endpoint = request.format.endpoint(),
            filename = %request.filename,
            "requesting export"
        );

        let response = self
            .client
            .post(self.url(request.format.endpoint()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Export(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message =
                extract_detail(&body).unwrap_or_else(|| format!("server returned {status}"));
            return Err(AppError::Export(message));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::Export(e.to_string()))
    }
}

#[async_trait]
impl ResumeProcessor for ApiClient {
    /// POST /process-resume: the single long-running submission call.
    async fn process(
        &self,
        file: &ResumeFile,
        job_title: &str,
        job_description: &str,
    ) -> Result<ResultBundle, AppError> {
        let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = multipart::Form::new()
            .part("file", part)
            .text("job_title", job_title.to_string())
            .text("job_description", job_description.to_string());

        debug!(file = %file.name, %job_title, "submitting resume for processing");

        let response = self
            .client
            .post(self.url("/process-resume"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status,
                detail: extract_detail(&body),
            });
        }

        let body: ProcessResponse = response.json().await?;
        Ok(body.results)
    }
}

/// Pulls the `detail` field out of an error body. Bodies that are not the
/// expected shape yield `None`, which upstream maps to generic wording.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().map(|e| e.detail)
}
