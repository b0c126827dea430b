//! Web search provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::WebError;
use crate::config::WebResearchConfig;
use crate::models::WebSearchResult;
use crate::utils::HttpClient;

const TAVILY_API_URL: &str = "https://api.tavily.com";

/// A web search backend
#[async_trait]
pub trait WebSearch: Send + Sync + std::fmt::Debug {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<WebSearchResult>, WebError>;
}

/// Tavily search API client
#[derive(Clone)]
pub struct TavilySearch {
    client: HttpClient,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for TavilySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavilySearch")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WebSearchResult>,
}

impl TavilySearch {
    pub fn new(client: HttpClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: TAVILY_API_URL.to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build from configuration; the API key is required
    pub fn from_config(client: HttpClient, config: &WebResearchConfig) -> Result<Self, WebError> {
        let api_key = config
            .tavily_api_key
            .as_deref()
            .ok_or(WebError::MissingConfig("TAVILY_API_KEY"))?;

        let search = Self::new(client, api_key);
        Ok(match &config.tavily_base_url {
            Some(url) => search.base_url(url.as_str()),
            None => search,
        })
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebSearchResult>, WebError> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
            search_depth: "basic",
        };

        let response = self
            .client
            .post(&format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebError::Api {
                provider: "tavily",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}
