//! MCP (Model Context Protocol) support
//!
//! Integration with remote MCP tool servers, authenticated with brokered
//! bearer tokens.
//!
//! # Architecture
//!
//! - `MCPServer`: wraps an rmcp service connection to a single server
//! - `MCPServerManager`: manages multiple servers, fans out tool listing
//! - `RemoteFailure` / `classify`: tagged failure envelope and the
//!   interaction-required classifier
//! - `MCPToolAdapter`: adapts MCP tools to the Tool trait, classifying
//!   every invocation failure
//! - `MCPToolProvider`: exposes MCP tools to the registry, honoring the
//!   configured allow-list
//!
//! # Tool namespacing
//!
//! MCP tools are namespaced with their server ID to avoid conflicts:
//! server `mcp_server` + tool `read_file` is exposed as
//! `mcp_server__read_file`. Allow-list filtering happens on the original
//! names, before namespacing.

mod classify;
mod config;
mod error;
mod manager;
mod provider;
mod server;
mod tool_adapter;

// Public exports
pub use classify::{classify, Classified, DEFAULT_INTERACTION_MESSAGE, INTERACTION_REQUIRED_CODE};
pub use config::MCPConfig;
pub use error::RemoteFailure;
pub use manager::{MCPServerManager, MCPToolInfo};
pub use provider::MCPToolProvider;
pub use server::MCPServer;
pub use tool_adapter::MCPToolAdapter;
