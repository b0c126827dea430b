//! Paper registry: topic search backed by a preprint source, plus lookup
//! of previously stored papers by id.

mod store;

pub use store::{normalize_topic, Lookup, TopicPapers, TopicStore, PAPERS_FILE};

use std::sync::Arc;

use crate::config::PaperRegistryConfig;
use crate::models::SearchQuery;
use crate::sources::{ArxivSource, Source, SourceError};

/// Default number of papers requested by `search_papers`
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Returned by `extract_info` when nothing has been cached yet
pub const NO_PAPERS_MESSAGE: &str =
    "No papers have been searched for yet. Use search_papers first.";

/// Returned by `extract_info` when no topic holds the id
pub fn not_found_message(paper_id: &str) -> String {
    format!("There's no saved information related to paper {}.", paper_id)
}

/// Errors surfaced by `search_papers`
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to write topic cache: {0}")]
    Io(#[from] std::io::Error),
}

/// The paper registry tool backend
#[derive(Debug)]
pub struct PaperRegistry {
    source: Arc<dyn Source>,
    store: TopicStore,
}

impl PaperRegistry {
    pub fn new(source: Arc<dyn Source>, store: TopicStore) -> Self {
        Self { source, store }
    }

    /// arXiv-backed registry rooted at the configured paper directory
    pub fn from_config(config: &PaperRegistryConfig) -> Result<Self, RegistryError> {
        Ok(Self::new(
            Arc::new(ArxivSource::new()?),
            TopicStore::new(&config.paper_dir),
        ))
    }

    pub fn store(&self) -> &TopicStore {
        &self.store
    }

    /// Search the source for `topic`, merge the hits into the topic cache
    /// and return their ids in provider rank order.
    pub async fn search_papers(
        &self,
        topic: &str,
        max_results: usize,
    ) -> Result<Vec<String>, RegistryError> {
        if topic.trim().is_empty() {
            return Err(RegistryError::InvalidRequest(
                "topic must not be empty".to_string(),
            ));
        }
        if max_results == 0 {
            return Err(RegistryError::InvalidRequest(
                "max_results must be positive".to_string(),
            ));
        }

        tracing::info!("Searching for papers on topic: {}", topic);

        let query = SearchQuery::new(topic).max_results(max_results);
        let papers = self.source.search(&query).await?;

        let path = self.store.merge(topic, &papers)?;
        tracing::info!("Results are saved in: {}", path.display());

        Ok(papers.into_iter().map(|p| p.paper_id).collect())
    }

    /// Stored metadata for `paper_id` as pretty JSON, or a message saying
    /// why there is none. Never fails.
    pub async fn extract_info(&self, paper_id: &str) -> String {
        tracing::info!("Extracting information for paper ID: {}", paper_id);

        match self.store.find(paper_id) {
            Ok(Lookup::Found(info)) => serde_json::to_string_pretty(&info)
                .unwrap_or_else(|_| not_found_message(paper_id)),
            Ok(Lookup::NotFound) => not_found_message(paper_id),
            Ok(Lookup::NoTopics) => NO_PAPERS_MESSAGE.to_string(),
            Err(e) => {
                tracing::warn!(
                    "Cannot read paper directory {}: {}",
                    self.store.root().display(),
                    e
                );
                NO_PAPERS_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperInfo;
    use crate::sources::mock::make_paper;
    use crate::sources::MockSource;
    use tempfile::tempdir;

    fn registry(source: Arc<MockSource>, root: &std::path::Path) -> PaperRegistry {
        PaperRegistry::new(source, TopicStore::new(root))
    }

    #[tokio::test]
    async fn test_search_returns_ids_in_rank_order() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::with_papers(vec![
            make_paper("2401.00003v1", "Third"),
            make_paper("2401.00001v1", "First"),
            make_paper("2401.00002v1", "Second"),
            make_paper("2401.00004v1", "Fourth"),
        ]));
        let registry = registry(source.clone(), dir.path());

        let ids = registry.search_papers("quantum computing", 3).await.unwrap();

        assert_eq!(ids, vec!["2401.00003v1", "2401.00001v1", "2401.00002v1"]);
        let stored = registry.store().load("quantum computing");
        assert_eq!(stored.len(), 3);
        assert!(ids.iter().all(|id| stored.contains_key(id)));

        let queries = source.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].query, "quantum computing");
        assert_eq!(queries[0].max_results, 3);
    }

    #[tokio::test]
    async fn test_repeated_search_merges() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::with_papers(vec![
            make_paper("a", "A"),
            make_paper("b", "B"),
        ]));
        let registry = registry(source.clone(), dir.path());
        registry.search_papers("Graph Theory", 5).await.unwrap();

        source.set_papers(vec![make_paper("b", "B v2"), make_paper("c", "C")]);
        registry.search_papers("graph theory", 5).await.unwrap();

        let stored = registry.store().load("graph theory");
        let ids: Vec<&str> = stored.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(stored["b"]["title"], "B v2");
    }

    #[tokio::test]
    async fn test_search_validates_arguments() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new());
        let registry = registry(source.clone(), dir.path());

        assert!(matches!(
            registry.search_papers("  ", 5).await,
            Err(RegistryError::InvalidRequest(_))
        ));
        assert!(matches!(
            registry.search_papers("topic", 0).await,
            Err(RegistryError::InvalidRequest(_))
        ));
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn test_search_propagates_source_errors() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new());
        source.set_failure("provider down");
        let registry = registry(source, dir.path());

        let result = registry.search_papers("topic", 2).await;
        assert!(matches!(result, Err(RegistryError::Source(_))));
        assert!(!registry.store().topic_dir("topic").exists());
    }

    #[tokio::test]
    async fn test_search_keeps_entries_the_record_type_cannot_read() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::with_papers(vec![make_paper("new", "New")]));
        let registry = registry(source, dir.path());

        let file = registry.store().topic_file("ml");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(
            &file,
            r#"{"old1": {"title": "Old", "authors": ["A"], "summary": "", "pdf_url": null, "published": "2020-01-01"},
                "old2": {"title": "Old two", "authors": [], "summary": "", "pdf_url": "p", "published": "2020-01-02"}}"#,
        )
        .unwrap();

        assert!(registry.extract_info("old2").await.contains("\"Old two\""));

        registry.search_papers("ml", 5).await.unwrap();

        let stored = registry.store().load("ml");
        let ids: Vec<&str> = stored.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["new", "old1", "old2"]);
        assert!(registry.extract_info("old1").await.contains("\"pdf_url\": null"));
    }

    #[tokio::test]
    async fn test_extract_info_before_any_search() {
        let dir = tempdir().unwrap();
        let registry = registry(Arc::new(MockSource::new()), &dir.path().join("papers"));

        assert_eq!(registry.extract_info("2401.00001v1").await, NO_PAPERS_MESSAGE);
    }

    #[tokio::test]
    async fn test_extract_info_found_and_missing() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::with_papers(vec![make_paper("1234.5678v1", "Known")]));
        let registry = registry(source, dir.path());
        registry.search_papers("known things", 5).await.unwrap();

        let json = registry.extract_info("1234.5678v1").await;
        let info: PaperInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info.title, "Known");
        assert!(json.contains("\n  \"title\""));

        assert_eq!(
            registry.extract_info("9999.9999v1").await,
            "There's no saved information related to paper 9999.9999v1."
        );
    }
}
