//! Preprint search providers.
//!
//! The paper registry talks to its provider only through the [`Source`]
//! trait, so tests can swap the live arXiv client for a [`MockSource`].

mod arxiv;
pub mod mock;

pub use arxiv::ArxivSource;
pub use mock::MockSource;

use crate::models::{Paper, SearchQuery};
use async_trait::async_trait;

/// A searchable preprint index
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Return up to `query.max_results` papers in provider rank order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Connection failure, timeout or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Parsing error (Atom, JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                SourceError::RateLimit
            }
            Some(status) => SourceError::Http {
                status: status.as_u16(),
            },
            None => SourceError::Network(err.to_string()),
        }
    }
}

impl From<feed_rs::parser::ParseFeedError> for SourceError {
    fn from(err: feed_rs::parser::ParseFeedError) -> Self {
        SourceError::Parse(format!("Atom: {}", err))
    }
}
