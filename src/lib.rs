//! # MCP Registry
//!
//! Two small Model Context Protocol tool servers:
//!
//! - the **paper registry** (`arxiv-server`) searches arXiv by topic, keeps
//!   the results in an on-disk cache partitioned by topic, and looks up
//!   cached papers by id;
//! - the **web researcher** (`websurfer-server`) runs a web search and has a
//!   hosted language model summarize the results.
//!
//! ## Architecture
//!
//! - [`config`]: transport and provider configuration
//! - [`models`]: paper records, search queries, research context
//! - [`sources`]: preprint providers (arXiv)
//! - [`papers`]: topic cache and the paper registry operations
//! - [`web`]: web search, language model and the research pipeline
//! - [`mcp`]: tool registry and the pmcp server wrapper
//! - [`utils`]: HTTP client, retry, port probing

pub mod cli;
pub mod config;
pub mod mcp;
pub mod models;
pub mod papers;
pub mod sources;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use config::ServerConfig;
pub use mcp::{McpServer, ServerError, ToolRegistry};
pub use models::{Paper, PaperInfo};
pub use papers::PaperRegistry;
pub use web::WebResearch;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
