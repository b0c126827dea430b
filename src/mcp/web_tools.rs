//! Handler for the web research tool.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::web::WebResearch;

/// `general_intelligence(query) -> string`
#[derive(Debug)]
pub struct GeneralIntelligenceHandler {
    pub research: Arc<WebResearch>,
}

#[async_trait::async_trait]
impl ToolHandler for GeneralIntelligenceHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'query' parameter")?;

        let answer = self
            .research
            .general_intelligence(query)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Value::String(answer))
    }
}
