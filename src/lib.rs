//! relay-agent-sdk
//!
//! Assembles an LLM tool-use agent's toolset from two external capability
//! providers: a RAG document-search service and remote MCP tool servers.
//! MCP connections authenticate with short-lived access tokens obtained by
//! exchanging an upstream identity token, cached per (principal, session)
//! and transparently re-exchanged on expiry. Remote tool failures pass
//! through an interaction-required classifier so "please re-authenticate"
//! conditions surface as actionable links instead of raw errors.
//!
//! The agent-execution framework itself (reasoning loop, LLM provider) is
//! an external collaborator: this crate hands it a [`tools::ToolRegistry`]
//! and the model settings from [`agent::AgentConfig`].

pub mod core;
pub mod logging;
pub mod tools;

// Brokered credentials for remote capability providers
pub mod auth;

// Capability providers
pub mod mcp;
pub mod rag;

// Toolset assembly
pub mod agent;

pub use crate::agent::{AgentBuilder, AgentConfig, AssembledAgent};
pub use crate::auth::{CredentialBroker, MemoryCredentialStore, TokenExchanger};
pub use crate::core::{AgentError, AgentResult, SessionContext};
