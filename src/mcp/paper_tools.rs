//! Handlers for the paper registry tools.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::papers::{PaperRegistry, DEFAULT_MAX_RESULTS};

/// `search_papers(topic, max_results = 5) -> [id]`
#[derive(Debug)]
pub struct SearchPapersHandler {
    pub registry: Arc<PaperRegistry>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchPapersHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;

        let max_results = match args.get("max_results") {
            None | Some(Value::Null) => DEFAULT_MAX_RESULTS,
            Some(v) => v
                .as_u64()
                .ok_or("'max_results' must be a positive integer")? as usize,
        };

        let ids = self
            .registry
            .search_papers(topic, max_results)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Value::from(ids))
    }
}

/// `extract_info(paper_id) -> string`
#[derive(Debug)]
pub struct ExtractInfoHandler {
    pub registry: Arc<PaperRegistry>,
}

#[async_trait::async_trait]
impl ToolHandler for ExtractInfoHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let paper_id = args
            .get("paper_id")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'paper_id' parameter")?;

        Ok(Value::String(self.registry.extract_info(paper_id).await))
    }
}
