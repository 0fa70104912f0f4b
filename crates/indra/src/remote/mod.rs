//! HTTP clients for the hosted assessment and chatbot backends.

mod assessment;
mod chatbot;
pub mod models;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub use assessment::{AssessmentApi, HttpAssessmentApi};
pub use chatbot::{ChatbotRepository, NetworkChatbotRepository};
pub use models::{
    ArAnalysis, AssessmentRequest, AssessmentResponse, ChatbotAnswer, ChatbotRequest,
    ChatbotResponse, CostBenefitAnalysis, KnowledgeQuery, KnowledgeReply, LocationInfo,
    RwhAnalysis,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeouts applied to every outbound request. Requests are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpSettings {
    pub fn build_client(&self) -> Result<Client, RemoteError> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(RemoteError::Network)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
    #[error("server responded with HTTP {code} {reason}")]
    Status { code: u16, reason: String },
    #[error("server returned an empty body")]
    EmptyBody,
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    /// True when the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Resolves `path` against `base`, treating `base` as a directory.
pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url, RemoteError> {
    let invalid = |reason: String| RemoteError::InvalidEndpoint {
        url: base.to_string(),
        reason,
    };

    let mut root = base.trim().to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    let root = Url::parse(&root).map_err(|err| invalid(err.to_string()))?;
    if root.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    root.join(path.trim_start_matches('/'))
        .map_err(|err| invalid(err.to_string()))
}

pub(crate) async fn post_json<B, R>(client: &Client, url: &Url, body: &B) -> Result<R, RemoteError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!(%url, "POST");
    let response = client
        .post(url.clone())
        .json(body)
        .send()
        .await
        .map_err(RemoteError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }

    let bytes = response.bytes().await.map_err(RemoteError::Network)?;
    let text = std::str::from_utf8(&bytes).unwrap_or_default().trim();
    if bytes.iter().all(u8::is_ascii_whitespace) || text == "null" {
        return Err(RemoteError::EmptyBody);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
