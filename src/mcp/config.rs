//! MCP configuration
//!
//! Configuration for the remote MCP server an agent binds tools from.

use serde::{Deserialize, Serialize};

/// Configuration for the MCP capability provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MCPConfig {
    /// Base URL of the MCP server. `None` disables the MCP provider.
    #[serde(default)]
    pub url: Option<String>,

    /// Allow-list of tool names (original, un-namespaced names) to expose
    /// to the LLM. `None` exposes every tool the server offers.
    #[serde(default)]
    pub tools: Option<Vec<String>>,
}

impl MCPConfig {
    /// Create a config pointing at a server URL, exposing all tools
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            tools: None,
        }
    }

    /// Restrict the exposed tools to the given names
    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Whether a tool (by its original name) passes the allow-list
    pub fn is_tool_allowed(&self, name: &str) -> bool {
        match &self.tools {
            Some(allowed) => allowed.iter().any(|t| t == name),
            None => true,
        }
    }
}
