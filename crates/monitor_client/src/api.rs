use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use monitor_core::JobId;
use serde::Serialize;

use crate::wire::{ErrorDetail, Report};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http status {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Timeout;
        }
        if err.is_decode() {
            return ApiError::Malformed(err.to_string());
        }
        ApiError::Network(err.to_string())
    }
}

#[derive(Serialize)]
struct SignInBody<'a> {
    login: &'a str,
    password: &'a str,
}

/// One-shot HTTP calls against the crawl server's `/api` surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, settings: ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /api/signin`; the response body is the session token itself.
    pub async fn sign_in(&self, login: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/signin", self.base))
            .json(&SignInBody { login, password })
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.text().await?)
    }

    /// `GET /api/test/{token}`; the server answers `ok` for a live token.
    pub async fn test_token(&self, token: &str) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/test/{token}", self.base))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.text().await? == "ok")
    }

    /// `POST /api/reports/{token}`: keys of all completed reports.
    pub async fn reports(&self, token: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/reports/{token}", self.base))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// `POST /api/report/{token}` with the JSON-encoded report key as body.
    pub async fn report(&self, token: &str, key: &str) -> Result<Report, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/report/{token}", self.base))
            .json(&key)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// `POST /api/processerrors/{id}/{token}`: errors recorded so far for
    /// one running job, keyed by failing URL.
    pub async fn job_errors(
        &self,
        token: &str,
        id: JobId,
    ) -> Result<BTreeMap<String, ErrorDetail>, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/processerrors/{id}/{token}", self.base))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(response)
}

/// Report and error-listing fetches, abstracted so the session driver can
/// be exercised without a live server.
#[async_trait::async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<String>, ApiError>;
    async fn fetch_report(&self, key: &str) -> Result<Report, ApiError>;
    async fn fetch_job_errors(&self, id: JobId) -> Result<BTreeMap<String, ErrorDetail>, ApiError>;
}

/// [`ApiClient`] bound to one session token.
pub struct AuthorizedClient {
    api: ApiClient,
    token: String,
}

impl AuthorizedClient {
    pub fn new(api: ApiClient, token: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            api,
            token: token.into(),
        })
    }
}

#[async_trait::async_trait]
impl ReportFetcher for AuthorizedClient {
    async fn list_reports(&self) -> Result<Vec<String>, ApiError> {
        self.api.reports(&self.token).await
    }

    async fn fetch_report(&self, key: &str) -> Result<Report, ApiError> {
        self.api.report(&self.token, key).await
    }

    async fn fetch_job_errors(
        &self,
        id: JobId,
    ) -> Result<BTreeMap<String, ErrorDetail>, ApiError> {
        self.api.job_errors(&self.token, id).await
    }
}
