//! Paper model representing a preprint returned by a provider.

use serde::{Deserialize, Serialize};

/// Metadata stored for one paper inside a topic cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperInfo {
    /// Paper title
    pub title: String,

    /// Author names in provider order
    pub authors: Vec<String>,

    /// Abstract text
    pub summary: String,

    /// Direct PDF URL
    pub pdf_url: String,

    /// Publication date (`YYYY-MM-DD`)
    pub published: String,
}

/// A paper as returned by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Provider short identifier (e.g. `2301.12345v1`)
    pub paper_id: String,

    /// Paper title
    pub title: String,

    /// Author names in provider order
    pub authors: Vec<String>,

    /// Abstract text
    pub summary: String,

    /// Direct PDF URL
    pub pdf_url: String,

    /// Publication date (`YYYY-MM-DD`)
    pub published: String,
}

impl Paper {
    /// Create a new paper with required fields
    pub fn new(paper_id: String, title: String) -> Self {
        Self {
            paper_id,
            title,
            authors: Vec::new(),
            summary: String::new(),
            pdf_url: String::new(),
            published: String::new(),
        }
    }

    /// The record persisted in the topic cache
    pub fn info(&self) -> PaperInfo {
        PaperInfo {
            title: self.title.clone(),
            authors: self.authors.clone(),
            summary: self.summary.clone(),
            pdf_url: self.pdf_url.clone(),
            published: self.published.clone(),
        }
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with required fields
    pub fn new(paper_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            paper: Paper::new(paper_id.into(), title.into()),
        }
    }

    /// Set authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paper.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set abstract
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.paper.summary = summary.into();
        self
    }

    /// Set PDF URL
    pub fn pdf_url(mut self, url: impl Into<String>) -> Self {
        self.paper.pdf_url = url.into();
        self
    }

    /// Set publication date
    pub fn published(mut self, date: impl Into<String>) -> Self {
        self.paper.published = date.into();
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
