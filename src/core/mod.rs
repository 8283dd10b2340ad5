//! Core types for the agent SDK
//!
//! - `AgentError` / `AgentResult` - crate-wide error taxonomy
//! - `SessionContext` - correlation identifiers for the calling request

pub mod context;
pub mod error;

pub use context::SessionContext;
pub use error::{AgentError, AgentResult};
