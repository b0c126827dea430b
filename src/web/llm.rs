//! Hosted language model client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::WebError;
use crate::config::WebResearchConfig;
use crate::utils::HttpClient;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Single-prompt text completion
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    async fn complete(&self, prompt: &str) -> Result<String, WebError>;
}

/// Anthropic Messages API client
#[derive(Clone)]
pub struct AnthropicModel {
    client: HttpClient,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl std::fmt::Debug for AnthropicModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicModel")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicModel {
    pub fn new(client: HttpClient, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: 1024,
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build from configuration; `MODEL_ID` and the API key are required
    pub fn from_config(client: HttpClient, config: &WebResearchConfig) -> Result<Self, WebError> {
        let model = config
            .model_id
            .as_deref()
            .ok_or(WebError::MissingConfig("MODEL_ID"))?;
        let api_key = config
            .anthropic_api_key
            .as_deref()
            .ok_or(WebError::MissingConfig("ANTHROPIC_API_KEY"))?;

        let llm = Self::new(client, api_key, model).max_tokens(config.max_tokens);
        Ok(match &config.anthropic_base_url {
            Some(url) => llm.base_url(url.as_str()),
            None => llm,
        })
    }
}

#[async_trait]
impl LanguageModel for AnthropicModel {
    async fn complete(&self, prompt: &str) -> Result<String, WebError> {
        let request = MessageRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebError::Api {
                provider: "anthropic",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessageResponse = response.json().await?;
        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();

        Ok(text)
    }
}
