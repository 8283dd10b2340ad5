//! RAG search tool
//!
//! A Tool that searches a document collection and returns the results as a
//! tagged-text block. A failed search renders inside the block rather than
//! failing the tool call, so the LLM always sees well-formed output.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::AgentResult;
use crate::tools::{Tool, ToolDefinition, ToolInputSchema, ToolResult};

use super::client::{format_documents, format_search_error, RagClient};

const DEFAULT_DESCRIPTION: &str =
    "Search your collection of documents for results semantically similar to the input query";

/// Number of documents requested per search
const SEARCH_LIMIT: usize = 10;

/// Tool searching one RAG collection
pub struct RagSearchTool {
    client: RagClient,
    /// Collection identifier used in API paths
    collection: String,
    /// Display name exposed to the LLM (the collection's name when known)
    name: String,
    description: String,
}

impl RagSearchTool {
    fn input_schema() -> ToolInputSchema {
        ToolInputSchema::new()
            .with_properties(json!({
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant documents"
                }
            }))
            .with_required(vec!["query".to_string()])
    }
}

/// Create a RAG search tool for a specific collection.
///
/// Fetches the collection's metadata up front: the collection's name
/// becomes the tool name and its description is folded into the tool
/// description. A metadata fetch failure is an error - a configured RAG
/// collection that cannot be reached should be surfaced, not silently
/// dropped.
pub async fn create_rag_tool(client: RagClient, collection: &str) -> AgentResult<RagSearchTool> {
    let info = client.collection(collection).await?;

    let name = info
        .name
        .clone()
        .unwrap_or_else(|| collection.to_string());

    let description = match info.description() {
        Some(raw) => format!("{DEFAULT_DESCRIPTION}. Collection description: {raw}"),
        None => DEFAULT_DESCRIPTION.to_string(),
    };

    tracing::info!("Created RAG tool '{}' for collection '{}'", name, collection);

    Ok(RagSearchTool {
        client,
        collection: collection.to_string(),
        name,
        description,
    })
}

#[async_trait]
impl Tool for RagSearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: Self::input_schema(),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let Some(query) = input.get("query").and_then(Value::as_str) else {
            return Ok(ToolResult::error("Missing required field: query"));
        };

        tracing::debug!(
            "Searching collection '{}' for: {}",
            self.collection,
            query
        );

        let output = match self.client.search(&self.collection, query, SEARCH_LIMIT).await {
            Ok(documents) => format_documents(&documents),
            Err(e) => format_search_error(&e),
        };

        Ok(ToolResult::success(output))
    }
}
