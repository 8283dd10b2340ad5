//! Tool registry for managing available tools
//!
//! The registry holds all tools that are available to the agent.
//! It supports both static tools (registered directly) and dynamic tools
//! from providers (like MCP servers).

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use super::provider::ToolProvider;
use super::tool::{Tool, ToolDefinition, ToolResult};

/// Registry that holds all available tools
pub struct ToolRegistry {
    /// Static tools registered directly
    tools: HashMap<String, Arc<dyn Tool>>,

    /// Dynamic tool providers (MCP, etc.)
    providers: Vec<Arc<dyn ToolProvider>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            providers: Vec::new(),
        }
    }

    /// Register a static tool in the registry
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register an already-boxed tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Add a tool provider (MCP, etc.)
    ///
    /// This will immediately fetch all tools from the provider and add them
    /// to the registry. Returns an error if any tool name conflicts with
    /// existing tools.
    pub async fn add_provider(&mut self, provider: Arc<dyn ToolProvider>) -> Result<()> {
        tracing::info!(
            "[ToolRegistry] Adding provider '{}' (dynamic: {})",
            provider.name(),
            provider.is_dynamic()
        );

        let tools = provider.get_tools().await?;

        for tool in tools {
            let name = tool.name().to_string();

            // Check for conflicts
            if self.tools.contains_key(&name) {
                return Err(anyhow::anyhow!(
                    "Tool name conflict: '{}' already exists (from provider '{}')",
                    name,
                    provider.name()
                ));
            }

            tracing::info!(
                "[ToolRegistry] Registering tool '{}' from provider '{}'",
                name,
                provider.name()
            );
            self.tools.insert(name, tool);
        }

        self.providers.push(provider);

        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tool definitions for the hosting framework
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: &Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .with_context(|| format!("Tool not found: {}", name))?;

        tracing::info!("Executing tool: {}", name);
        tracing::debug!("Input: {:?}", input);

        let result = tool.execute(input).await?;

        tracing::debug!("Tool {} completed. Is error: {}", name, result.is_error);

        Ok(result)
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
