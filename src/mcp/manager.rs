//! MCP server manager
//!
//! Manages multiple MCP server connections and fans out tool listing over
//! them. When every branch of the fan-out fails, the per-branch failures
//! are joined into a single aggregate envelope in server-id order, so the
//! classifier sees a deterministic tree.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::RemoteFailure;
use super::server::MCPServer;

/// Information about an MCP tool from a specific server
#[derive(Debug, Clone)]
pub struct MCPToolInfo {
    /// ID of the server this tool belongs to
    pub server_id: String,

    /// Arc reference to the server
    pub server: Arc<MCPServer>,

    /// The tool definition from rmcp
    pub tool_def: rmcp::model::Tool,
}

/// Manages connections to multiple MCP servers
pub struct MCPServerManager {
    /// Map of server ID to server instance
    servers: Arc<RwLock<HashMap<String, Arc<MCPServer>>>>,
}

impl MCPServerManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self {
            servers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add a connected server
    pub async fn add_server(&self, server: MCPServer) -> Result<()> {
        let id = server.id().to_string();

        if self.servers.read().await.contains_key(&id) {
            return Err(anyhow!("MCP server '{}' already exists", id));
        }

        self.servers.write().await.insert(id.clone(), Arc::new(server));

        tracing::info!("[MCPServerManager] Added MCP server '{}'", id);

        Ok(())
    }

    /// Get a server by ID
    pub async fn get_server(&self, id: &str) -> Option<Arc<MCPServer>> {
        self.servers.read().await.get(id).cloned()
    }

    /// Get all server IDs, sorted
    pub async fn server_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.servers.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Get all tools from all connected servers.
    ///
    /// Listing fans out concurrently over the servers (in sorted-id order).
    /// A partial failure is logged and skipped so one bad server cannot
    /// take down the rest; if every server fails, the failures are joined
    /// into `RemoteFailure::Aggregate` in the same order.
    pub async fn get_all_tools(&self) -> Result<Vec<MCPToolInfo>, RemoteFailure> {
        let servers: Vec<(String, Arc<MCPServer>)> = {
            let guard = self.servers.read().await;
            let mut entries: Vec<_> = guard
                .iter()
                .map(|(id, server)| (id.clone(), server.clone()))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries
        };

        if servers.is_empty() {
            return Ok(Vec::new());
        }

        let listings = futures::future::join_all(
            servers
                .iter()
                .map(|(_, server)| async move { server.list_tools().await }),
        )
        .await;

        let mut all_tools = Vec::new();
        let mut failures = Vec::new();

        for ((server_id, server), listing) in servers.into_iter().zip(listings) {
            match listing {
                Ok(tools) => {
                    tracing::info!(
                        "[MCPServerManager] Got {} tools from server '{}'",
                        tools.len(),
                        server_id
                    );

                    for tool_def in tools {
                        all_tools.push(MCPToolInfo {
                            server_id: server_id.clone(),
                            server: server.clone(),
                            tool_def,
                        });
                    }
                }
                Err(failure) => {
                    tracing::warn!(
                        "[MCPServerManager] Failed to get tools from server '{}': {}",
                        server_id,
                        failure
                    );
                    failures.push(failure);
                }
            }
        }

        if all_tools.is_empty() && !failures.is_empty() {
            return Err(match failures.len() {
                1 => failures.remove(0),
                _ => RemoteFailure::aggregate(failures),
            });
        }

        Ok(all_tools)
    }

    /// Get the number of connected servers
    pub async fn server_count(&self) -> usize {
        self.servers.read().await.len()
    }

    /// Check if manager has any servers
    pub async fn is_empty(&self) -> bool {
        self.servers.read().await.is_empty()
    }
}

impl Default for MCPServerManager {
    fn default() -> Self {
        Self::new()
    }
}
