//! Web research: a web search whose results are summarized by a hosted
//! language model.

mod llm;
mod pipeline;
mod search;

pub use llm::{AnthropicModel, LanguageModel};
pub use pipeline::{summarize_prompt, ResearchPipeline, SEARCH_RESULTS};
pub use search::{TavilySearch, WebSearch};

use std::sync::Arc;

use crate::config::{WebResearchConfig, WebSection};
use crate::utils::HttpClient;

/// Errors from either pipeline step
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{provider} API returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },
}

/// The web research tool backend.
///
/// Provider settings are read from the environment on every call, so a
/// key added to `.env` takes effect without restarting the server.
#[derive(Debug)]
pub struct WebResearch {
    client: HttpClient,
    overrides: WebSection,
    providers: Option<(Arc<dyn WebSearch>, Arc<dyn LanguageModel>)>,
}

impl WebResearch {
    pub fn new() -> Result<Self, WebError> {
        Ok(Self {
            // Neither step is time-limited; only connecting is.
            client: HttpClient::without_timeout()?,
            overrides: WebSection::default(),
            providers: None,
        })
    }

    /// Use fixed providers instead of resolving them from the environment
    pub fn with_providers(
        search: Arc<dyn WebSearch>,
        model: Arc<dyn LanguageModel>,
    ) -> Result<Self, WebError> {
        Ok(Self {
            providers: Some((search, model)),
            ..Self::new()?
        })
    }

    /// Apply `[web]` values from a config file on top of the environment
    pub fn file_overrides(mut self, section: WebSection) -> Self {
        self.overrides = section;
        self
    }

    fn pipeline(&self) -> Result<ResearchPipeline, WebError> {
        let config = WebResearchConfig::from_env().with_file(&self.overrides);

        let (search, model) = match &self.providers {
            Some((search, model)) => (search.clone(), model.clone()),
            None => (
                Arc::new(TavilySearch::from_config(self.client.clone(), &config)?)
                    as Arc<dyn WebSearch>,
                Arc::new(AnthropicModel::from_config(self.client.clone(), &config)?)
                    as Arc<dyn LanguageModel>,
            ),
        };

        Ok(ResearchPipeline::new(search, model))
    }

    /// Search the web for `query` and return a model-written summary
    pub async fn general_intelligence(&self, query: &str) -> Result<String, WebError> {
        tracing::info!("Calling web search for query: {}", query);
        self.pipeline()?.general_intelligence(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::models::WebSearchResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSearch {
        limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl WebSearch for RecordingSearch {
        async fn search(
            &self,
            _query: &str,
            max_results: usize,
        ) -> Result<Vec<WebSearchResult>, WebError> {
            self.limits.lock().unwrap().push(max_results);
            Ok(Vec::new())
        }
    }

    #[derive(Debug)]
    struct EchoModel;

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn complete(&self, _prompt: &str) -> Result<String, WebError> {
            Ok("done".to_string())
        }
    }

    #[tokio::test]
    async fn test_config_file_cannot_raise_search_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "[web]\nmax_results = 10\nmax_tokens = 256\n").unwrap();
        let file = load_config(&path).unwrap();

        let search = Arc::new(RecordingSearch::default());
        let research = WebResearch::with_providers(search.clone(), Arc::new(EchoModel))
            .unwrap()
            .file_overrides(file.web);

        assert_eq!(research.general_intelligence("q").await.unwrap(), "done");
        assert_eq!(*search.limits.lock().unwrap(), vec![SEARCH_RESULTS]);
        assert_eq!(SEARCH_RESULTS, 2);
    }
}
