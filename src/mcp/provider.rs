//! MCP tool provider
//!
//! Implements the ToolProvider trait over the server manager, applying the
//! configured allow-list before tools reach the registry.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::tools::{Tool, ToolProvider};

use super::manager::MCPServerManager;
use super::tool_adapter::MCPToolAdapter;

/// Tool provider that fetches tools from MCP servers
pub struct MCPToolProvider {
    /// Manager for MCP servers
    manager: Arc<MCPServerManager>,

    /// Allow-list of original tool names; `None` exposes everything
    allowed_tools: Option<Vec<String>>,
}

impl MCPToolProvider {
    /// Create a new MCP tool provider exposing every tool
    pub fn new(manager: Arc<MCPServerManager>) -> Self {
        Self {
            manager,
            allowed_tools: None,
        }
    }

    /// Restrict the provider to the given tool names (original names,
    /// before namespacing)
    pub fn with_allowed_tools(mut self, allowed: Option<Vec<String>>) -> Self {
        self.allowed_tools = allowed;
        self
    }

    fn is_allowed(&self, tool_name: &str) -> bool {
        match &self.allowed_tools {
            Some(allowed) => allowed.iter().any(|t| t == tool_name),
            None => true,
        }
    }
}

#[async_trait]
impl ToolProvider for MCPToolProvider {
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>> {
        tracing::info!("[MCPToolProvider] Fetching tools from all MCP servers");

        let mcp_tools = self.manager.get_all_tools().await?;

        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
        let mut filtered = 0usize;

        for mcp_tool_info in mcp_tools {
            if !self.is_allowed(&mcp_tool_info.tool_def.name) {
                filtered += 1;
                continue;
            }

            let adapter = MCPToolAdapter::new(
                mcp_tool_info.server_id,
                mcp_tool_info.server,
                mcp_tool_info.tool_def,
            );

            tools.push(Arc::new(adapter));
        }

        tracing::info!(
            "[MCPToolProvider] Created {} tool adapters ({} filtered by allow-list)",
            tools.len(),
            filtered
        );

        Ok(tools)
    }

    async fn refresh(&self) -> Result<()> {
        tracing::info!("[MCPToolProvider] Refreshing MCP tools");
        // Re-fetching is handled by get_tools()
        Ok(())
    }

    fn name(&self) -> &str {
        "MCP"
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_filter() {
        let provider = MCPToolProvider::new(Arc::new(MCPServerManager::new()))
            .with_allowed_tools(Some(vec!["Math_Divide".into()]));

        assert!(provider.is_allowed("Math_Divide"));
        assert!(!provider.is_allowed("Math_Add"));

        let open = MCPToolProvider::new(Arc::new(MCPServerManager::new()));
        assert!(open.is_allowed("anything"));
    }
}
