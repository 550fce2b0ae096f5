use std::time::Duration;

use chrono::Utc;

use crate::{ApiError, FailureKind, PreviewDocument, RawRecord, ScrapeOutcome, StatusReport};
use extractor_core::ScrapeRequest;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Download endpoint for a result file, for handing to the system browser.
    pub fn download_url(&self, filename: &str) -> Result<String, ApiError> {
        let url = endpoint(&self.base_url, &["api", "download", filename])?;
        Ok(url.to_string())
    }
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn start_scrape(&self, request: &ScrapeRequest) -> Result<(), ApiError>;
    async fn fetch_status(&self) -> Result<StatusReport, ApiError>;
    async fn fetch_preview(&self, filename: &str) -> Result<Vec<RawRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn start_scrape(&self, request: &ScrapeRequest) -> Result<(), ApiError> {
        let url = endpoint(&self.settings.base_url, &["api", "scrape"])?;
        let body = serde_json::json!({
            "city": request.city,
            "areas": request.areas,
            "category": request.category,
            "custom_query": request.custom_query,
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;

        let outcome: ScrapeOutcome = response
            .json()
            .await
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))?;
        if outcome.status == "success" {
            Ok(())
        } else {
            let message = if outcome.message.is_empty() {
                "scrape submission rejected".to_string()
            } else {
                outcome.message
            };
            Err(ApiError::new(FailureKind::Rejected, message))
        }
    }

    async fn fetch_status(&self) -> Result<StatusReport, ApiError> {
        let url = endpoint(&self.settings.base_url, &["api", "status"])?;

        // Cache-buster so an intermediary proxy never serves a stale report.
        let response = self
            .client
            .get(url)
            .query(&[("t", Utc::now().timestamp_millis())])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;

        response
            .json()
            .await
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))
    }

    async fn fetch_preview(&self, filename: &str) -> Result<Vec<RawRecord>, ApiError> {
        let url = endpoint(&self.settings.base_url, &["api", "view", filename])?;

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;

        let document: PreviewDocument = response
            .json()
            .await
            .map_err(|err| ApiError::new(FailureKind::MalformedBody, err.to_string()))?;
        if document.status == "success" {
            Ok(document.data)
        } else {
            let message = if document.message.is_empty() {
                "view request rejected".to_string()
            } else {
                document.message
            };
            Err(ApiError::new(FailureKind::Rejected, message))
        }
    }
}

/// Builds `{base}/{segments...}`, percent-encoding each segment.
fn endpoint(base_url: &str, segments: &[&str]) -> Result<url::Url, ApiError> {
    let mut url = url::Url::parse(base_url)
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
        .extend(segments);
    Ok(url)
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
