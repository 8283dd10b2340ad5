//! Tool system
//!
//! - `Tool` - trait implemented by every tool exposed to the agent
//! - `ToolRegistry` - holds the assembled toolset
//! - `ToolProvider` - trait for dynamic tool sources (MCP servers)

mod provider;
mod registry;
mod tool;

pub use provider::ToolProvider;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDefinition, ToolInputSchema, ToolResult};
