//! Core data models for papers, searches and web research.

mod paper;
mod research;
mod search;

pub use paper::{Paper, PaperBuilder, PaperInfo};
pub use research::{ResearchContext, WebSearchResult};
pub use search::SearchQuery;
