//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::paper_tools::{ExtractInfoHandler, SearchPapersHandler};
use super::web_tools::GeneralIntelligenceHandler;
use crate::papers::{PaperRegistry, DEFAULT_MAX_RESULTS};
use crate::web::WebResearch;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_papers")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry of the tools one server exposes
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Tools of the paper registry server
    pub fn for_papers(registry: Arc<PaperRegistry>) -> Self {
        let mut tools = Self::new();

        tools.register(Tool {
            name: "search_papers".to_string(),
            description: "Search for papers on arXiv based on a topic and store their information. \
                          Returns the list of paper IDs found."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "The topic to search for"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to retrieve",
                        "default": DEFAULT_MAX_RESULTS,
                        "minimum": 1
                    }
                },
                "required": ["topic"]
            }),
            handler: Arc::new(SearchPapersHandler {
                registry: registry.clone(),
            }),
        });

        tools.register(Tool {
            name: "extract_info".to_string(),
            description: "Search for information about a specific paper across all topic directories. \
                          Returns the stored metadata as JSON, or a message if it is not found."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "paper_id": {
                        "type": "string",
                        "description": "The ID of the paper to look for"
                    }
                },
                "required": ["paper_id"]
            }),
            handler: Arc::new(ExtractInfoHandler { registry }),
        });

        tools
    }

    /// Tools of the web research server
    pub fn for_web(research: Arc<WebResearch>) -> Self {
        let mut tools = Self::new();

        tools.register(Tool {
            name: "general_intelligence".to_string(),
            description: "Answer generic queries by searching the internet and summarizing the results"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "User query on the topic of interest"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(GeneralIntelligenceHandler { research }),
        });

        tools
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
