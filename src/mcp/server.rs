//! MCP server wrapper
//!
//! Wraps an rmcp service connection to a single MCP server. Connections are
//! authenticated with a brokered bearer token carried as a default header on
//! the underlying HTTP client; list/call failures are lifted into the
//! [`RemoteFailure`] envelope so the classifier can inspect them.

use anyhow::{anyhow, Result};
use rmcp::model::{CallToolRequestParams, CallToolResult, ListToolsResult, Tool};
use rmcp::service::RunningService;
use rmcp::transport::{
    streamable_http_client::StreamableHttpClientTransportConfig, StreamableHttpClientTransport,
};
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::RemoteFailure;

/// The concrete transport type used for HTTP MCP connections
pub type HttpClientTransport = StreamableHttpClientTransport<reqwest::Client>;

/// Wrapper around an rmcp service connection
pub struct MCPServer {
    /// Unique identifier for this server (used for tool namespacing)
    id: String,

    /// The underlying rmcp service (None if not connected)
    service: Arc<RwLock<Option<RunningService<RoleClient, ()>>>>,
}

impl std::fmt::Debug for MCPServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MCPServer").field("id", &self.id).finish()
    }
}

impl MCPServer {
    /// Create a server from an existing RunningService
    pub fn from_service(id: impl Into<String>, service: RunningService<RoleClient, ()>) -> Self {
        let id = id.into();
        tracing::info!("[MCPServer] Created MCP server '{}'", id);

        Self {
            id,
            service: Arc::new(RwLock::new(Some(service))),
        }
    }

    /// Connect to `uri` with a bearer token obtained from the credential
    /// broker.
    ///
    /// The token rides as a default `Authorization` header on the reqwest
    /// client backing the streamable-HTTP transport, so every request of
    /// the connection carries it.
    pub async fn connect(
        id: impl Into<String>,
        uri: &str,
        access_token: &str,
    ) -> Result<Self> {
        let id = id.into();
        tracing::info!("[MCPServer] Connecting to '{}' at {}", id, uri);

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {access_token}"))
                .map_err(|e| anyhow!("invalid access token for Authorization header: {e}"))?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        let transport_config = StreamableHttpClientTransportConfig::with_uri(uri);
        let transport: HttpClientTransport =
            HttpClientTransport::with_client(client, transport_config);

        let service = ().serve(transport).await?;

        Ok(Self::from_service(id, service))
    }

    /// Get the server ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Check if the server is connected
    pub async fn is_connected(&self) -> bool {
        self.service.read().await.is_some()
    }

    /// List all tools available on this server
    pub async fn list_tools(&self) -> Result<Vec<Tool>, RemoteFailure> {
        let service_guard = self.service.read().await;
        let service = service_guard.as_ref().ok_or_else(|| {
            RemoteFailure::transport(format!("MCP server '{}' is not connected", self.id))
        })?;

        tracing::debug!("[MCPServer] Listing tools from '{}'", self.id);

        let result: ListToolsResult = service
            .list_tools(Default::default())
            .await
            .map_err(RemoteFailure::from)?;

        tracing::info!(
            "[MCPServer] Got {} tools from '{}'",
            result.tools.len(),
            self.id
        );

        Ok(result.tools)
    }

    /// Call a tool on this server
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, RemoteFailure> {
        let service_guard = self.service.read().await;
        let service = service_guard.as_ref().ok_or_else(|| {
            RemoteFailure::transport(format!("MCP server '{}' is not connected", self.id))
        })?;

        tracing::info!("[MCPServer] Calling tool '{}' on server '{}'", name, self.id);
        tracing::debug!("[MCPServer] Arguments: {:?}", arguments);

        let result = service
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_string().into(),
                arguments,
                task: None,
            })
            .await
            .map_err(RemoteFailure::from)?;

        tracing::debug!("[MCPServer] Tool call completed for '{}'", name);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires a running MCP server
    async fn test_mcp_server_connection() {
        let server = MCPServer::connect("test-server", "http://localhost:8005/mcp", "test-token")
            .await
            .unwrap();
        assert!(server.is_connected().await);

        let tools = server.list_tools().await.unwrap();
        assert!(!tools.is_empty());
    }
}
