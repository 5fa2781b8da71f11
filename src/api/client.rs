//! HTTP implementation of the question-answering client.
//!
//! One call to `ask` is one `POST {base}ask` and exactly one `AnswerResult`.
//! No retries happen here; a retry is always a fresh submission by the user.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};

use super::types::{AnswerResult, AskRequest, AskResponse, Question, ServerStatus};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The configured base address is not a usable http(s) URL.
    InvalidAddress(String),
    /// The exchange did not finish in time.
    Timeout,
    /// Connection-level failure (DNS, connection refused, reset).
    Network(String),
    /// The server answered with a non-200 status.
    Api { status: u16 },
    /// The server answered 200 but the body was not what we expect.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidAddress(msg) => write!(f, "invalid base address {msg}"),
            ClientError::Timeout => write!(f, "timeout"),
            ClientError::Network(msg) => write!(f, "{msg}"),
            ClientError::Api { status } => write!(f, "HTTP {status}"),
            ClientError::Parse(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for AnswerResult {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status } => AnswerResult::HttpFailure {
                status_code: status,
            },
            other => AnswerResult::TransportFailure {
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout;
        }
        if err.is_connect() {
            return ClientError::Network(format!("could not connect ({})", root_cause(&err)));
        }
        ClientError::Network(root_cause(&err))
    }
}

/// Innermost error message; reqwest's own Display repeats the URL.
fn root_cause(err: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}

/// Resolves `path` against the base address, treating the base as a directory.
pub fn endpoint(base_address: &str, path: &str) -> Result<Url, ClientError> {
    let trimmed = base_address.trim();
    let mut base = Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidAddress(format!("'{trimmed}': {e}")))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ClientError::InvalidAddress(format!(
            "'{trimmed}': scheme must be http or https"
        )));
    }

    if base.query().is_some() || base.fragment().is_some() {
        return Err(ClientError::InvalidAddress(format!(
            "'{trimmed}': query and fragment are not allowed"
        )));
    }

    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }

    base.join(path)
        .map_err(|e| ClientError::InvalidAddress(format!("'{trimmed}': {e}")))
}

#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Submits one question to `{base_address}ask` and classifies the outcome.
    async fn ask(&self, question: &Question, base_address: &str) -> AnswerResult;

    /// Fetches the backend's self-description from `{base_address}`.
    async fn status(&self, base_address: &str) -> Result<ServerStatus, ClientError>;
}

/// `QueryClient` over reqwest.
pub struct HttpQueryClient {
    client: reqwest::Client,
}

impl HttpQueryClient {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    async fn try_ask(
        &self,
        question: &Question,
        base_address: &str,
    ) -> Result<AskResponse, ClientError> {
        let url = endpoint(base_address, "ask")?;

        info!(
            "Ask request: url={}, language={}, question_len={}",
            url,
            question.language,
            question.text.len()
        );

        let response = self
            .client
            .post(url)
            .json(&AskRequest::from(question))
            .send()
            .await?;

        let status = response.status();
        debug!("Ask response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Ask failed: {} - {}", status.as_u16(), body);
            return Err(ClientError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: AskResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;

        info!(
            "Ask succeeded: answer_len={}, source={:?}",
            parsed.answer.len(),
            parsed.source
        );
        Ok(parsed)
    }
}

impl Default for HttpQueryClient {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn ask(&self, question: &Question, base_address: &str) -> AnswerResult {
        match self.try_ask(question, base_address).await {
            Ok(response) => response.into(),
            Err(e) => {
                info!("Ask outcome: {}", e);
                e.into()
            }
        }
    }

    async fn status(&self, base_address: &str) -> Result<ServerStatus, ClientError> {
        let url = endpoint(base_address, "")?;
        debug!("Status request: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}
