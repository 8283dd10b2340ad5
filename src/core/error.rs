//! Crate error types

use thiserror::Error;

/// Errors surfaced by toolkit assembly and tool execution
#[derive(Error, Debug)]
pub enum AgentError {
    /// The remote tool needs the end user to complete an authentication
    /// step before the call can succeed. `message` already has the redirect
    /// URL appended when one was provided, so it can be rendered directly.
    #[error("Interaction required: {message}")]
    InteractionRequired {
        message: String,
        url: Option<String>,
    },

    /// A capability provider could not be set up (e.g. the RAG collection
    /// metadata fetch failed)
    #[error("Tool setup failed: {0}")]
    ToolSetup(String),

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        AgentError::Other(msg.into())
    }

    /// Create a tool setup error
    pub fn tool_setup(msg: impl Into<String>) -> Self {
        AgentError::ToolSetup(msg.into())
    }

    /// Whether this error should be presented as a user-actionable
    /// re-authentication prompt rather than a generic failure
    pub fn is_interaction_required(&self) -> bool {
        matches!(self, AgentError::InteractionRequired { .. })
    }
}

/// Result type alias for crate operations
pub type AgentResult<T> = Result<T, AgentError>;
