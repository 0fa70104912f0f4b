use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::info;

use super::models::{AssessmentRequest, AssessmentResponse};
use super::{endpoint, post_json, HttpSettings, RemoteError};
use crate::config::RemoteConfig;

/// Detailed site analysis served by the assessment backend.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResponse, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct HttpAssessmentApi {
    client: Client,
    url: Url,
}

impl HttpAssessmentApi {
    pub fn new(client: Client, base_url: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            client,
            url: endpoint(base_url, "assess")?,
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        Self::with_settings(&config.assessment_url, config.http_settings())
    }

    pub fn with_settings(base_url: &str, settings: HttpSettings) -> Result<Self, RemoteError> {
        Self::new(settings.build_client()?, base_url)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl AssessmentApi for HttpAssessmentApi {
    async fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResponse, RemoteError> {
        let response: AssessmentResponse = post_json(&self.client, &self.url, request).await?;
        info!(
            name = %request.name,
            score = response.feasibility_score,
            "remote assessment received"
        );
        Ok(response)
    }
}
