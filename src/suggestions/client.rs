use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;

use super::dto::{GenerateRequest, GenerateResponse};
use crate::config::GeminiConfig;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("no generative-text api key configured")]
    MissingApiKey,
    #[error("generative-text service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("generative-text service answered {0}")]
    Status(StatusCode),
    #[error("malformed generative-text payload: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("generative-text reply had no text")]
    EmptyReply,
}

#[async_trait]
pub trait AlternativesSuggester: Send + Sync {
    /// Raw model text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: &GeminiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.trim_start_matches("models/").to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AlternativesSuggester for GeminiClient {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
        let key = self.api_key.as_deref().ok_or(SuggestError::MissingApiKey)?;

        let res = self
            .http
            .post(self.generate_url())
            .query(&[("key", key)])
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(SuggestError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(SuggestError::Status(status));
        }

        let body: GenerateResponse = res.json().await.map_err(|e| {
            if e.is_decode() {
                SuggestError::Decode(e)
            } else {
                SuggestError::Transport(e)
            }
        })?;

        body.first_text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(SuggestError::EmptyReply)
    }
}
