//! Agent assembly
//!
//! - `AgentConfig` - per-request configuration (model settings + providers)
//! - `AgentBuilder` - assembles the toolset, brokering MCP credentials

mod builder;
mod config;

pub use builder::{AgentBuilder, AssembledAgent};
pub use config::AgentConfig;
