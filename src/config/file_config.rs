//! Configuration file layout for the tool servers.
//!
//! Both binaries accept an optional TOML file through `--config`, read by
//! [`load_config`](super::load_config).
//! Every key can also be overridden with an `MCP_REGISTRY_` prefixed
//! environment variable (double underscore separates sections).
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//!
//! [papers]
//! paper_dir = "./papers"
//!
//! [web]
//! max_tokens = 1024
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file structure
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Transport section
    #[serde(default)]
    pub server: ServerSection,

    /// Paper registry section
    #[serde(default)]
    pub papers: PapersSection,

    /// Web research section
    #[serde(default)]
    pub web: WebSection,
}

/// `[server]` section
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub host: Option<String>,
}

/// `[papers]` section
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PapersSection {
    #[serde(default)]
    pub paper_dir: Option<PathBuf>,
}

/// `[web]` section
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WebSection {
    #[serde(default)]
    pub max_tokens: Option<u32>,
}
