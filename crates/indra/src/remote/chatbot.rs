use async_trait::async_trait;
use reqwest::{Client, Url};

use super::models::{ChatbotRequest, ChatbotResponse};
use super::{endpoint, post_json, HttpSettings, RemoteError};
use crate::config::RemoteConfig;

/// Question answering backend used by the chat screen.
#[async_trait]
pub trait ChatbotRepository: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct NetworkChatbotRepository {
    client: Client,
    url: Url,
}

impl NetworkChatbotRepository {
    pub fn new(client: Client, base_url: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            client,
            url: endpoint(base_url, "query")?,
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        Self::with_settings(&config.chatbot_url, config.http_settings())
    }

    pub fn with_settings(base_url: &str, settings: HttpSettings) -> Result<Self, RemoteError> {
        Self::new(settings.build_client()?, base_url)
    }
}

#[async_trait]
impl ChatbotRepository for NetworkChatbotRepository {
    async fn ask(&self, question: &str) -> Result<String, RemoteError> {
        let body = ChatbotRequest {
            question: question.to_string(),
        };
        let response: ChatbotResponse = post_json(&self.client, &self.url, &body).await?;
        Ok(response.answer.result)
    }
}
