//! Search request model for preprint providers.

use serde::{Deserialize, Serialize};

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Main search query string, passed to the provider as given
    pub query: String,

    /// Maximum number of results to return
    pub max_results: usize,
}

impl SearchQuery {
    /// Create a new search query for up to five results
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 5,
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("quantum computing");
        assert_eq!(query.max_results, 5);

        let query = query.max_results(12);
        assert_eq!(query.query, "quantum computing");
        assert_eq!(query.max_results, 12);
    }
}
