//! arXiv preprint source.

use async_trait::async_trait;
use feed_rs::model::Entry;
use feed_rs::parser;
use std::time::Duration;

use crate::models::{Paper, PaperBuilder, SearchQuery};
use crate::sources::{Source, SourceError};
use crate::utils::{arxiv_retry_config, with_retry, HttpClient, RetryConfig};

/// Base URL for arXiv API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Base URL for arXiv PDFs
const ARXIV_PDF_URL: &str = "https://arxiv.org/pdf";
/// Results are always relevance ranked, best first
const SORT_PARAMS: &str = "sortBy=relevance&sortOrder=descending";
/// Entries requested per API call
const PAGE_SIZE: usize = 100;
/// Hard cap on results for one search
const MAX_RESULTS: usize = 2000;
/// Pause between consecutive page requests
const PAGE_DELAY: Duration = Duration::from_secs(3);

/// arXiv research source
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: HttpClient,
    api_url: String,
    retry: RetryConfig,
}

impl ArxivSource {
    /// Create a new arXiv source against the public API
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(HttpClient::new()?, ARXIV_API_URL))
    }

    /// Create with a custom HTTP client and endpoint
    pub fn with_client(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            retry: arxiv_retry_config(),
        }
    }

    /// Replace the retry policy
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Short identifier from an entry id URL.
    ///
    /// `http://arxiv.org/abs/2301.12345v2` gives `2301.12345v2` and
    /// `http://arxiv.org/abs/math/0104020v1` gives `math/0104020v1`.
    pub fn short_id(entry_id: &str) -> Option<String> {
        let id = match entry_id.rsplit_once("/abs/") {
            Some((_, id)) => id,
            None => entry_id.rsplit('/').next()?,
        };
        let id = id.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    fn page_url(&self, query: &SearchQuery, start: usize, max_results: usize) -> String {
        format!(
            "{}?search_query={}&start={}&max_results={}&{}",
            self.api_url,
            urlencoding::encode(query.query.trim()),
            start,
            max_results,
            SORT_PARAMS
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<Entry>, SourceError> {
        let client = &self.client;
        with_retry(self.retry, move || async move {
            let response = client
                .get(url)
                .header("Accept", "application/atom+xml")
                .send()
                .await
                .map_err(|e| SourceError::Network(format!("Failed to fetch arXiv results: {}", e)))?;

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(SourceError::RateLimit);
            }
            if !status.is_success() {
                return Err(SourceError::Http {
                    status: status.as_u16(),
                });
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

            Ok(parser::parse(bytes.as_ref())?.entries)
        })
        .await
    }

    /// Parse an Atom entry into a Paper
    fn parse_entry(entry: &Entry) -> Result<Paper, SourceError> {
        let paper_id = Self::short_id(&entry.id)
            .ok_or_else(|| SourceError::Parse(format!("Missing paper ID in '{}'", entry.id)))?;

        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();

        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default();

        let pdf_url = entry
            .links
            .iter()
            .find(|l| {
                l.media_type.as_deref() == Some("application/pdf") || l.title.as_deref() == Some("pdf")
            })
            .map(|l| l.href.clone())
            .unwrap_or_else(|| format!("{}/{}", ARXIV_PDF_URL, paper_id));

        let published = entry
            .published
            .map(|d| d.date_naive().to_string())
            .unwrap_or_default();

        Ok(PaperBuilder::new(paper_id, title)
            .authors(entry.authors.iter().map(|a| a.name.trim().to_string()))
            .summary(summary)
            .pdf_url(pdf_url)
            .published(published)
            .build())
    }
}

#[async_trait]
impl Source for ArxivSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SourceError> {
        if query.query.trim().is_empty() {
            return Err(SourceError::InvalidRequest("Empty search query".to_string()));
        }

        let wanted = query.max_results.min(MAX_RESULTS);
        let mut papers = Vec::with_capacity(wanted);

        while papers.len() < wanted {
            let page_size = (wanted - papers.len()).min(PAGE_SIZE);
            if !papers.is_empty() {
                tokio::time::sleep(PAGE_DELAY).await;
            }

            let url = self.page_url(query, papers.len(), page_size);
            tracing::debug!("Requesting arXiv page: {}", url);

            let entries = self.fetch_page(&url).await?;
            let received = entries.len();
            for entry in &entries {
                papers.push(Self::parse_entry(entry)?);
            }

            if received < page_size {
                break;
            }
        }

        papers.truncate(wanted);
        Ok(papers)
    }
}
