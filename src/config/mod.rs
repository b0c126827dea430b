//! Configuration management.
//!
//! Transport settings are passed explicitly to the server as a
//! [`ServerConfig`]; nothing is communicated through process environment.
//! Provider credentials for the web research tool are read from the
//! environment (and an optional `.env` file) each time the tool runs.

mod file_config;

pub use file_config::{ConfigFile, PapersSection, ServerSection, WebSection};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port of the paper registry server
pub const PAPER_SERVER_PORT: u16 = 8765;

/// Default port of the web research server
pub const WEB_SERVER_PORT: u16 = 8767;

/// Transport configuration for an MCP tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind
    pub port: u16,
}

impl ServerConfig {
    /// Create a config bound to localhost on the given port
    pub fn new(port: u16) -> Self {
        Self {
            host: default_host(),
            port,
        }
    }

    /// Override the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Paper registry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRegistryConfig {
    /// Root of the topic cache
    #[serde(default = "default_paper_dir")]
    pub paper_dir: PathBuf,
}

impl Default for PaperRegistryConfig {
    fn default() -> Self {
        Self {
            paper_dir: std::env::var("MCP_REGISTRY_PAPER_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_paper_dir()),
        }
    }
}

fn default_paper_dir() -> PathBuf {
    PathBuf::from("papers")
}

/// Web research settings, resolved at call time
#[derive(Clone, Serialize, Deserialize)]
pub struct WebResearchConfig {
    /// Tavily search API key (`TAVILY_API_KEY`)
    pub tavily_api_key: Option<String>,

    /// Language model identifier (`MODEL_ID`)
    pub model_id: Option<String>,

    /// Anthropic API key (`ANTHROPIC_API_KEY`)
    pub anthropic_api_key: Option<String>,

    /// Override for the search endpoint (`TAVILY_BASE_URL`)
    pub tavily_base_url: Option<String>,

    /// Override for the model endpoint (`ANTHROPIC_BASE_URL`)
    pub anthropic_base_url: Option<String>,

    /// Output token cap for the summary
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl std::fmt::Debug for WebResearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebResearchConfig")
            .field("tavily_api_key", &self.tavily_api_key.as_ref().map(|_| "***"))
            .field("model_id", &self.model_id)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "***"),
            )
            .field("tavily_base_url", &self.tavily_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for WebResearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            model_id: None,
            anthropic_api_key: None,
            tavily_base_url: None,
            anthropic_base_url: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl WebResearchConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            tavily_api_key: non_empty("TAVILY_API_KEY"),
            model_id: non_empty("MODEL_ID"),
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            tavily_base_url: non_empty("TAVILY_BASE_URL"),
            anthropic_base_url: non_empty("ANTHROPIC_BASE_URL"),
            ..Self::default()
        }
    }

    /// Apply values from a config file's `[web]` section
    pub fn with_file(mut self, section: &WebSection) -> Self {
        if let Some(max_tokens) = section.max_tokens {
            self.max_tokens = max_tokens;
        }
        self
    }
}

fn default_max_tokens() -> u32 {
    1024
}

/// Load a `.env` file from the working directory, ignoring a missing file
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!("Failed to load .env file: {}", err);
        }
    }
}

/// Load a configuration file with `MCP_REGISTRY_*` environment overrides
pub fn load_config(path: &Path) -> Result<ConfigFile, ::config::ConfigError> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path))
        .add_source(::config::Environment::with_prefix("MCP_REGISTRY").separator("__"))
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::new(PAPER_SERVER_PORT);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.bind_addr(), "127.0.0.1:8765");

        let config = ServerConfig::new(WEB_SERVER_PORT).host("0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:8767");
    }

    #[test]
    fn test_web_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("TAVILY_API_KEY", "tvly-test"),
            ("MODEL_ID", "claude-test"),
            ("ANTHROPIC_API_KEY", "  "),
        ]
        .into_iter()
        .collect();

        let config = WebResearchConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.tavily_api_key.as_deref(), Some("tvly-test"));
        assert_eq!(config.model_id.as_deref(), Some("claude-test"));
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_web_config_debug_redacts_keys() {
        let config = WebResearchConfig {
            tavily_api_key: Some("secret-value".to_string()),
            ..WebResearchConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-value"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "[papers]\npaper_dir = \"cache\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.papers.paper_dir, Some(PathBuf::from("cache")));
        assert!(config.server.host.is_none());
    }

    #[test]
    fn test_load_config_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\n\n[web]\nmax_tokens = 512\nmax_results = 10\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.web.max_tokens, Some(512));

        let web = WebResearchConfig::default().with_file(&config.web);
        assert_eq!(web.max_tokens, 512);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }
}
