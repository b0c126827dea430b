//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::models::{Paper, PaperBuilder, SearchQuery};
use crate::sources::{Source, SourceError};

/// A programmable in-memory source.
///
/// Returns the configured papers (truncated to `max_results`) and records
/// every query it receives.
#[derive(Debug, Default)]
pub struct MockSource {
    papers: Mutex<Vec<Paper>>,
    fail: Mutex<Option<String>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockSource {
    /// Create a new mock source with no papers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that returns `papers`.
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        let source = Self::new();
        source.set_papers(papers);
        source
    }

    /// Replace the papers returned by subsequent searches.
    pub fn set_papers(&self, papers: Vec<Paper>) {
        *self.papers.lock().unwrap_or_else(PoisonError::into_inner) = papers;
    }

    /// Make subsequent searches fail with a network error.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.fail.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Source for MockSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SourceError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        if let Some(message) = self.fail.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(SourceError::Network(message));
        }

        let papers = self.papers.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(papers.iter().take(query.max_results).cloned().collect())
    }
}

/// Helper function to create a mock paper for testing.
pub fn make_paper(paper_id: &str, title: &str) -> Paper {
    PaperBuilder::new(paper_id, title)
        .authors(["Test Author"])
        .summary(format!("Abstract of {}", title))
        .pdf_url(format!("http://arxiv.org/pdf/{}", paper_id))
        .published("2024-01-01")
        .build()
}
