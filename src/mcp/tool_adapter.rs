//! MCP tool adapter
//!
//! Adapts a remote MCP tool to the crate's Tool trait. Every invocation
//! failure passes through the interaction-required classifier: the one
//! recoverable case becomes a distinguished, user-actionable error, and
//! everything else propagates exactly as it arrived.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::core::AgentError;
use crate::tools::{Tool, ToolDefinition, ToolInputSchema, ToolResult};

use super::classify::{classify, Classified};
use super::server::MCPServer;

/// Adapter that wraps an MCP tool to implement the Tool trait
pub struct MCPToolAdapter {
    /// ID of the server this tool belongs to
    server_id: String,

    /// Reference to the MCP server
    server: Arc<MCPServer>,

    /// Original tool name (used when calling the MCP server)
    tool_name: String,

    /// Exposed name with namespace (e.g., "mcp_server__read_file")
    exposed_name: String,

    /// Tool definition converted to the crate's format
    tool_definition: ToolDefinition,
}

impl MCPToolAdapter {
    /// Create a new MCP tool adapter with namespacing
    pub fn new(server_id: String, server: Arc<MCPServer>, rmcp_tool: rmcp::model::Tool) -> Self {
        // Namespaced name: "server_id__tool_name" (double underscore for clarity)
        let exposed_name = format!("{}__{}", server_id, rmcp_tool.name);

        let tool_definition = Self::convert_tool_definition(&exposed_name, &rmcp_tool);

        Self {
            server_id,
            server,
            tool_name: rmcp_tool.name.to_string(),
            exposed_name,
            tool_definition,
        }
    }

    /// Original (un-namespaced) tool name
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Convert an rmcp Tool definition to the crate's ToolDefinition
    fn convert_tool_definition(name: &str, rmcp_tool: &rmcp::model::Tool) -> ToolDefinition {
        // rmcp's input_schema is an Arc<JsonObject> (Map<String, Value>)
        let schema_obj = rmcp_tool.input_schema.as_ref();

        let input_schema = ToolInputSchema {
            schema_type: schema_obj
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("object")
                .to_string(),
            properties: schema_obj.get("properties").cloned(),
            required: schema_obj
                .get("required")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                }),
        };

        ToolDefinition {
            name: name.to_string(),
            description: rmcp_tool.description.as_ref().map(|d| d.to_string()),
            input_schema,
        }
    }

    /// Convert an rmcp CallToolResult to the crate's ToolResult
    fn convert_mcp_result(&self, rmcp_result: rmcp::model::CallToolResult) -> Result<ToolResult> {
        use rmcp::model::RawContent;

        let is_error = rmcp_result.is_error.unwrap_or(false);

        let mut text_parts = Vec::new();

        for content in rmcp_result.content {
            match &content.raw {
                RawContent::Text(text_content) => {
                    text_parts.push(text_content.text.clone());
                }
                RawContent::Image(image_content) => {
                    // Validate the payload is real base64 before passing the
                    // size along; decoded bytes themselves stay binary
                    use base64::Engine;
                    let decoded = base64::engine::general_purpose::STANDARD
                        .decode(&image_content.data)
                        .map_err(|e| anyhow::anyhow!("Failed to decode base64 image: {}", e))?;
                    text_parts.push(format!(
                        "[image {} bytes, {}]",
                        decoded.len(),
                        image_content.mime_type
                    ));
                }
                RawContent::Resource(resource_content) => {
                    text_parts.push(serde_json::to_string_pretty(&resource_content.resource)?);
                }
                _ => {
                    // Other content types (Audio, ResourceLink) as JSON
                    text_parts.push(serde_json::to_string_pretty(&content)?);
                }
            }
        }

        let output = text_parts.join("\n\n");

        if is_error {
            Ok(ToolResult::error(output))
        } else {
            Ok(ToolResult::success(output))
        }
    }
}

#[async_trait]
impl Tool for MCPToolAdapter {
    fn name(&self) -> &str {
        &self.exposed_name
    }

    fn description(&self) -> &str {
        self.tool_definition
            .description
            .as_deref()
            .unwrap_or("MCP tool (no description)")
    }

    fn definition(&self) -> ToolDefinition {
        self.tool_definition.clone()
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        tracing::info!(
            "[MCPToolAdapter] Executing '{}' on server '{}'",
            self.tool_name,
            self.server_id
        );
        tracing::debug!("[MCPToolAdapter] Input: {}", input);

        let arguments = input.as_object().cloned();

        // Call with the ORIGINAL tool name (not namespaced)
        match self.server.call_tool(&self.tool_name, arguments).await {
            Ok(rmcp_result) => {
                let result = self.convert_mcp_result(rmcp_result)?;

                tracing::debug!(
                    "[MCPToolAdapter] Tool '{}' completed. Is error: {}",
                    self.tool_name,
                    result.is_error
                );

                Ok(result)
            }
            Err(failure) => match classify(failure) {
                Classified::InteractionRequired { message, url } => {
                    tracing::info!(
                        "[MCPToolAdapter] Tool '{}' requires user interaction: {}",
                        self.tool_name,
                        message
                    );
                    Err(AgentError::InteractionRequired { message, url }.into())
                }
                Classified::Unrecognized(original) => Err(original.into()),
            },
        }
    }
}
