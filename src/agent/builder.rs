//! Agent toolset assembly
//!
//! Builds the tool registry for one request: a RAG search tool when a
//! collection is configured, and MCP tools when a server is configured AND
//! the credential broker can produce a valid access token. A missing
//! credential is not an error - the agent simply runs with fewer tools.

use std::sync::Arc;

use crate::auth::CredentialBroker;
use crate::core::{AgentError, AgentResult, SessionContext};
use crate::mcp::{MCPServer, MCPServerManager, MCPToolProvider};
use crate::rag::{create_rag_tool, RagClient};
use crate::tools::ToolRegistry;

use super::config::AgentConfig;

/// Server ID used for the configured MCP connection
const MCP_SERVER_ID: &str = "mcp_server";

/// An agent ready to hand to the hosting framework: the assembled toolset
/// plus the model settings it was configured with
pub struct AssembledAgent {
    pub registry: ToolRegistry,
    pub config: AgentConfig,
}

impl AssembledAgent {
    /// Names of the tools the agent ended up with
    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.tool_names()
    }
}

/// Assembles agents from configuration, brokering MCP credentials
pub struct AgentBuilder {
    broker: Arc<CredentialBroker>,
}

impl AgentBuilder {
    pub fn new(broker: Arc<CredentialBroker>) -> Self {
        Self { broker }
    }

    /// Assemble the toolset for one request.
    ///
    /// RAG setup failures surface as errors (a configured collection that
    /// cannot be reached should be visible). MCP tools degrade gracefully:
    /// no brokered credential means no MCP tools, nothing more.
    pub async fn assemble(
        &self,
        config: AgentConfig,
        ctx: &SessionContext,
    ) -> AgentResult<AssembledAgent> {
        let mut registry = ToolRegistry::new();

        if let Some(rag) = &config.rag {
            if let (Some(rag_url), Some(collection)) = (&rag.rag_url, &rag.collection) {
                let client = RagClient::new(rag_url);
                let tool = create_rag_tool(client, collection).await?;
                registry.register(tool);
            }
        }

        if let Some(mcp) = &config.mcp {
            if let Some(url) = &mcp.url {
                match self
                    .broker
                    .ensure_valid_credential(ctx, Some(url.as_str()))
                    .await?
                {
                    None => {
                        tracing::info!("No MCP credential available, assembling without MCP tools");
                    }
                    Some(token) => {
                        let server = MCPServer::connect(MCP_SERVER_ID, url, &token.access_token)
                            .await
                            .map_err(|e| {
                                AgentError::tool_setup(format!("connecting to MCP server: {e}"))
                            })?;

                        let manager = Arc::new(MCPServerManager::new());
                        manager
                            .add_server(server)
                            .await
                            .map_err(|e| AgentError::tool_setup(e.to_string()))?;

                        let provider = MCPToolProvider::new(manager)
                            .with_allowed_tools(mcp.tools.clone());

                        registry
                            .add_provider(Arc::new(provider))
                            .await
                            .map_err(|e| {
                                AgentError::tool_setup(format!("binding MCP tools: {e}"))
                            })?;
                    }
                }
            }
        }

        tracing::info!(
            "Assembled agent with {} tool(s) for model {}",
            registry.len(),
            config.model_name
        );

        Ok(AssembledAgent { registry, config })
    }
}
