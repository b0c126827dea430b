//! Web research data passed between pipeline steps.

use serde::{Deserialize, Serialize};

/// One hit from the web search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResult {
    #[serde(default)]
    pub title: String,

    pub url: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Per-call state of the research pipeline.
///
/// Each step takes the context by value and hands back a new one, so a
/// step can only see what earlier steps produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchContext {
    /// The caller's query
    pub query: String,

    /// Raw search results, filled by the search step
    pub web_search: Vec<WebSearchResult>,

    /// Model output, filled by the summarize step
    pub final_answer: Option<String>,
}

impl ResearchContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            web_search: Vec::new(),
            final_answer: None,
        }
    }

    pub fn with_search(self, web_search: Vec<WebSearchResult>) -> Self {
        Self { web_search, ..self }
    }

    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        Self {
            final_answer: Some(answer.into()),
            ..self
        }
    }
}
