//! Two-step research pipeline: search, then summarize.

use std::sync::Arc;

use super::{LanguageModel, WebError, WebSearch};
use crate::models::{ResearchContext, WebSearchResult};

/// Results requested from the search provider per call. Not configurable.
pub const SEARCH_RESULTS: usize = 2;

const SUMMARY_INSTRUCTION: &str = "Your job is to summarize from the context provided to you. \
     The context includes information from web search:";

/// Prompt for the summarize step. An empty result set renders as `[]`.
pub fn summarize_prompt(results: &[WebSearchResult]) -> String {
    let context = serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());
    format!("{} {}", SUMMARY_INSTRUCTION, context)
}

/// Fixed search → summarize sequence, built fresh for each call
#[derive(Debug, Clone)]
pub struct ResearchPipeline {
    search: Arc<dyn WebSearch>,
    model: Arc<dyn LanguageModel>,
}

impl ResearchPipeline {
    pub fn new(search: Arc<dyn WebSearch>, model: Arc<dyn LanguageModel>) -> Self {
        Self { search, model }
    }

    async fn search_step(&self, context: ResearchContext) -> Result<ResearchContext, WebError> {
        tracing::info!("Searching web");
        let results = self.search.search(&context.query, SEARCH_RESULTS).await?;
        tracing::debug!("Web search returned {} results", results.len());
        Ok(context.with_search(results))
    }

    async fn summarize_step(&self, context: ResearchContext) -> Result<ResearchContext, WebError> {
        tracing::info!("Aggregating response");
        let answer = self.model.complete(&summarize_prompt(&context.web_search)).await?;
        Ok(context.with_answer(answer))
    }

    /// Run both steps once, in order. Any failure ends the run.
    pub async fn run(&self, query: &str) -> Result<ResearchContext, WebError> {
        let context = ResearchContext::new(query);
        let context = self.search_step(context).await?;
        self.summarize_step(context).await
    }

    /// The summary text for `query`
    pub async fn general_intelligence(&self, query: &str) -> Result<String, WebError> {
        let context = self.run(query).await?;
        Ok(context.final_answer.unwrap_or_default())
    }
}
